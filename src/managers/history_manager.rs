//! Search history for WikiSearch.
//!
//! Implements `HistoryLogTrait`: an ordered, duplicate-free list of
//! (query, language) pairs, persisted as one `"<query> (<code>)"` line per entry.

use std::fs;
use std::path::Path;

use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;
use crate::types::language::Language;

/// Trait defining history log operations.
pub trait HistoryLogTrait {
    fn append(&mut self, entry: HistoryEntry) -> bool;
    fn all(&self) -> &[HistoryEntry];
    fn contains(&self, entry: &HistoryEntry) -> bool;
    fn resolve_content_file(&self, entry: &HistoryEntry) -> Option<String>;
    fn serialize(&self) -> String;
    fn replace_all(&mut self, entries: Vec<HistoryEntry>);
    fn load(&mut self, path: &Path) -> Result<usize, HistoryError>;
    fn save(&self, path: &Path) -> Result<(), HistoryError>;
}

/// In-memory history log, oldest entry first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

/// File name of the saved article for a (query, language) pair.
///
/// Distinct pairs always get distinct names. A language given by its label
/// (`"EN"`) is written as its wiki code (`"en"`); any other code is
/// percent-encoded apart from upper-case ASCII letters and digits, so it can
/// never collide with a label. In the query only `%`, `/`, `\` and NUL are
/// encoded, which keeps the file inside its directory.
pub fn content_file_name(query: &str, language_code: &str) -> String {
    let mut name = String::with_capacity(query.len() + language_code.len() + 5);
    for c in query.chars() {
        push_escaped(&mut name, c, matches!(c, '%' | '/' | '\\' | '\0'));
    }

    name.push('_');
    match Language::ALL.iter().find(|l| l.label() == language_code) {
        Some(language) => name.push_str(language.code()),
        None => {
            for c in language_code.chars() {
                let plain = c.is_ascii_uppercase() || c.is_ascii_digit();
                push_escaped(&mut name, c, !plain);
            }
        }
    }

    name.push_str(".txt");
    name
}

fn push_escaped(out: &mut String, c: char, escape: bool) {
    if !escape {
        out.push(c);
        return;
    }
    let mut buf = [0u8; 4];
    for byte in c.encode_utf8(&mut buf).bytes() {
        out.push_str(&format!("%{:02X}", byte));
    }
}

/// Parses history file text into entries.
///
/// A line is kept only if it contains `" ("` and ends with `")"`. Anything
/// else is dropped without error so hand-edited or truncated files still load.
pub fn deserialize(text: &str) -> Vec<HistoryEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<HistoryEntry> {
    let Some(body) = line.strip_suffix(')') else {
        skip(line);
        return None;
    };
    let Some(split) = body.rfind(" (") else {
        skip(line);
        return None;
    };

    let query = body[..split].trim();
    let language_code = body[split + 2..].trim();
    Some(HistoryEntry::new(query, language_code))
}

fn skip(line: &str) {
    if !line.trim().is_empty() {
        tracing::debug!("skipping malformed history line: {:?}", line);
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from parsed entries, keeping the first of any duplicates.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut log = Self::new();
        log.replace_all(entries);
        log
    }

    /// Same as the free [`deserialize`] function.
    pub fn deserialize(text: &str) -> Vec<HistoryEntry> {
        deserialize(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }
}

impl HistoryLogTrait for HistoryLog {
    /// Appends `entry` unless an identical (query, language) pair is present.
    /// Returns `true` if the entry was added.
    fn append(&mut self, entry: HistoryEntry) -> bool {
        if self.contains(&entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn contains(&self, entry: &HistoryEntry) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Returns the content file name for an entry of this log.
    /// Whether the file still exists is for the caller to find out.
    fn resolve_content_file(&self, entry: &HistoryEntry) -> Option<String> {
        if !self.contains(entry) {
            return None;
        }
        Some(content_file_name(&entry.query, &entry.language_code))
    }

    fn serialize(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }

    fn replace_all(&mut self, entries: Vec<HistoryEntry>) {
        self.entries.clear();
        for entry in entries {
            self.append(entry);
        }
    }

    /// Replaces the in-memory log with the contents of `path`.
    ///
    /// A missing file yields an empty log. On a read error the current
    /// entries are kept. Returns the number of entries loaded.
    fn load(&mut self, path: &Path) -> Result<usize, HistoryError> {
        if !path.exists() {
            self.entries.clear();
            return Ok(0);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| HistoryError::IoError(format!("Failed to read history file: {}", e)))?;

        self.replace_all(deserialize(&content));
        Ok(self.entries.len())
    }

    /// Writes the whole log to `path`, replacing the previous file.
    fn save(&self, path: &Path) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HistoryError::IoError(format!("Failed to create history directory: {}", e))
            })?;
        }

        fs::write(path, self.serialize())
            .map_err(|e| HistoryError::IoError(format!("Failed to write history file: {}", e)))
    }
}
