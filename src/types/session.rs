use serde::{Deserialize, Serialize};

use super::language::Language;
use super::settings::Settings;

/// Per-run UI state: the selected wiki edition and the display preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub language: Language,
    pub settings: Settings,
}
