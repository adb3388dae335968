//! Search Controller for WikiSearch.
//!
//! Runs one search at a time: asks the `ArticleStore`, saves found articles
//! as content files, records them in the history log and reports a
//! `SearchOutcome` for the presentation layer to render.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::managers::history_manager::{content_file_name, HistoryLog, HistoryLogTrait};
use crate::services::article_store::ArticleStore;
use crate::types::article::{ArticleResult, DeepLink, ReplayOutcome, SearchOutcome};
use crate::types::config::DEFAULT_SERVICE_DOMAIN;
use crate::types::errors::{ContentError, HistoryError, LookupError};
use crate::types::history::HistoryEntry;

pub struct SearchController {
    store: Box<dyn ArticleStore>,
    history: HistoryLog,
    content_dir: PathBuf,
    history_path: Option<PathBuf>,
    service_domain: String,
}

impl SearchController {
    /// Creates a controller that saves content files into `content_dir`.
    pub fn new(store: Box<dyn ArticleStore>, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            history: HistoryLog::new(),
            content_dir: content_dir.into(),
            history_path: None,
            service_domain: DEFAULT_SERVICE_DOMAIN.to_string(),
        }
    }

    /// Persists the history to `path` after every new entry.
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    /// Domain used to build browser links, `wikipedia.org` by default.
    pub fn with_service_domain(mut self, domain: impl Into<String>) -> Self {
        self.service_domain = domain.into();
        self
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Reloads the history from the configured history file, if any.
    pub fn load_history(&mut self) -> Result<usize, HistoryError> {
        match &self.history_path {
            Some(path) => self.history.load(path),
            None => Ok(self.history.len()),
        }
    }

    /// Writes the history to the configured history file, if any.
    pub fn save_history(&self) -> Result<(), HistoryError> {
        match &self.history_path {
            Some(path) => self.history.save(path),
            None => Ok(()),
        }
    }

    /// Path of the content file for a (query, language) pair.
    pub fn content_path(&self, query: &str, language_code: &str) -> PathBuf {
        self.content_dir.join(content_file_name(query, language_code))
    }

    /// Searches for `query` and reports what happened.
    ///
    /// Line breaks and other control characters in the query become spaces
    /// before the lookup, so every history entry fits on one line. Only a
    /// found article touches the disk: its text is written to the content
    /// file (overwriting any previous copy) and, once that write succeeded,
    /// the (query, language) pair is added to the history.
    pub fn search(&mut self, query: &str, language_code: &str) -> SearchOutcome {
        let query = single_line(query);
        let query = query.as_str();
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }
        if !is_plain_code(language_code) {
            return SearchOutcome::Failed {
                reason: LookupError::UnsupportedLanguage(language_code.to_string()).to_string(),
            };
        }

        tracing::info!("searching {:?} in {}", query, language_code);
        let result = match self.store.lookup(query, language_code) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("lookup of {:?} failed: {}", query, e);
                return SearchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match result {
            ArticleResult::Found { text } => {
                match self.write_content(query, language_code, &text) {
                    Ok(()) => self.record(HistoryEntry::new(query, language_code)),
                    Err(e) => tracing::warn!("article shown but not saved: {}", e),
                }
                SearchOutcome::Displayed { text }
            }
            ArticleResult::Ambiguous { options } => SearchOutcome::Ambiguous { options },
            ArticleResult::NotFound => SearchOutcome::NotFound,
        }
    }

    /// Re-opens a history entry from its content file, without a lookup.
    pub fn replay(&self, entry: &HistoryEntry) -> ReplayOutcome {
        let Some(file_name) = self.history.resolve_content_file(entry) else {
            return ReplayOutcome::NotInHistory;
        };

        let path = self.content_dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(text) => ReplayOutcome::Loaded { text },
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("failed to read {}: {}", path.display(), e);
                }
                ReplayOutcome::FileMissing
            }
        }
    }

    /// Builds browser links for a disambiguation option. No lookup is made.
    pub fn resolve_option(&self, selected_title: &str, language_code: &str) -> DeepLink {
        let base = format!(
            "https://{}.{}/wiki",
            language_code.trim().to_lowercase(),
            self.service_domain
        );
        DeepLink {
            direct: format!("{}/{}", base, selected_title.replace(' ', "_")),
            search_fallback: format!(
                "{}/Special:Search?search={}",
                base,
                selected_title.replace(' ', "+")
            ),
        }
    }

    /// Writes the article with create-or-truncate semantics; a crash
    /// mid-write can leave a partial file behind.
    fn write_content(&self, query: &str, language_code: &str, text: &str) -> Result<(), ContentError> {
        fs::create_dir_all(&self.content_dir).map_err(|e| {
            ContentError::IoError(format!("Failed to create content directory: {}", e))
        })?;

        let path = self.content_path(query, language_code);
        fs::write(&path, text).map_err(|e| {
            ContentError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn record(&mut self, entry: HistoryEntry) {
        if !self.history.append(entry) {
            return;
        }
        if let Err(e) = self.save_history() {
            tracing::warn!("history kept in memory only: {}", e);
        }
    }
}

fn single_line(query: &str) -> String {
    let flattened: String = query
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    flattened.trim().to_string()
}

/// Codes are written between parentheses in the history file.
fn is_plain_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
