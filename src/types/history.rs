use std::fmt;

use serde::{Deserialize, Serialize};

/// A remembered (query, language) pair from a past successful search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub language_code: String,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language_code: language_code.into(),
        }
    }
}

/// Renders the entry the way it is listed and persisted: `"<query> (<code>)"`.
impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.query, self.language_code)
    }
}
