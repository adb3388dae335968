use std::fmt;

// === LookupError ===

/// Transport-level failures of the remote article lookup.
///
/// "No such article" and "ambiguous title" are not errors; they are
/// ordinary `ArticleResult` variants.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The service could not be reached, timed out, or answered with an error status.
    Transport(String),
    /// The service answered, but the body could not be understood.
    MalformedResponse(String),
    /// The language code is not one of the supported wiki editions.
    UnsupportedLanguage(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(msg) => write!(f, "Lookup transport failure: {}", msg),
            LookupError::MalformedResponse(msg) => {
                write!(f, "Malformed lookup response: {}", msg)
            }
            LookupError::UnsupportedLanguage(code) => {
                write!(f, "Unsupported language: {}", code)
            }
        }
    }
}

impl std::error::Error for LookupError {}

// === HistoryError ===

/// Errors related to persisting the search history file.
#[derive(Debug)]
pub enum HistoryError {
    /// Reading or writing the history file failed.
    IoError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IoError(msg) => write!(f, "History I/O error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === ContentError ===

/// Errors related to saved article content files.
#[derive(Debug)]
pub enum ContentError {
    /// Reading or writing a content file failed.
    IoError(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::IoError(msg) => write!(f, "Content file I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}

// === SessionError ===

/// Errors from changing the session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The requested language is not one of the supported wiki editions.
    UnsupportedLanguage(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnsupportedLanguage(code) => {
                write!(f, "Unsupported language: {}", code)
            }
        }
    }
}

impl std::error::Error for SessionError {}

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// File system I/O error.
    IoError(String),
    /// Serialization failed.
    SerializationError(String),
    /// The provided value is invalid for the given setting.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ThemeError ===

/// Errors related to theme colors.
#[derive(Debug)]
pub enum ThemeError {
    /// The provided color string is not a valid hex color.
    InvalidColor(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::InvalidColor(color) => write!(f, "Invalid color: {}", color),
        }
    }
}

impl std::error::Error for ThemeError {}
