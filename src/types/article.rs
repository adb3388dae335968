use serde::{Deserialize, Serialize};

/// What the remote lookup service returned for a (query, language) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArticleResult {
    Found { text: String },
    /// Candidate titles in the order the service suggested them.
    Ambiguous { options: Vec<String> },
    NotFound,
}

/// Result of a search request, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query was empty or whitespace only; nothing was looked up.
    EmptyQuery,
    Displayed { text: String },
    /// No choice has been made yet, so nothing was saved.
    Ambiguous { options: Vec<String> },
    NotFound,
    /// The lookup service could not be used.
    Failed { reason: String },
}

/// Result of re-opening a history entry from its saved content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplayOutcome {
    Loaded { text: String },
    /// The content file was removed after the entry was recorded.
    FileMissing,
    NotInHistory,
}

/// Browser links for a disambiguation option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLink {
    /// `https://<code>.<service>/wiki/<Title_With_Underscores>`
    pub direct: String,
    /// `https://<code>.<service>/wiki/Special:Search?search=<Title+With+Pluses>`
    pub search_fallback: String,
}
