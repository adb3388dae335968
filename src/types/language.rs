use std::fmt;

use serde::{Deserialize, Serialize};

/// The wiki editions the application can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    En,
    Ru,
    De,
    Fr,
    Es,
    Zh,
    Ja,
    Ko,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Language; 8] = [
        Language::En,
        Language::Ru,
        Language::De,
        Language::Fr,
        Language::Es,
        Language::Zh,
        Language::Ja,
        Language::Ko,
    ];

    /// Subdomain code of the wiki edition, e.g. `"en"`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ko => "ko",
        }
    }

    /// Label shown in the language menu and written to history, e.g. `"EN"`.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ru => "RU",
            Language::De => "DE",
            Language::Fr => "FR",
            Language::Es => "ES",
            Language::Zh => "ZH",
            Language::Ja => "JA",
            Language::Ko => "KO",
        }
    }

    /// Parses a code or label, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Language> {
        let wanted = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
