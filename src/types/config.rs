use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::platform;

pub const HISTORY_FILE_NAME: &str = "previous_search.txt";
pub const SETTINGS_FILE_NAME: &str = "settings.cfg";
pub const DEFAULT_SERVICE_DOMAIN: &str = "wikipedia.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the application keeps its files and how it reaches the lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the history file and the saved article files.
    pub data_dir: PathBuf,
    pub history_path: PathBuf,
    pub settings_path: PathBuf,
    /// Second-level domain of the wiki, e.g. `wikipedia.org`.
    pub service_domain: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Keeps every file (history, settings, articles) inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let data_dir = dir.into();
        Self {
            history_path: data_dir.join(HISTORY_FILE_NAME),
            settings_path: data_dir.join(SETTINGS_FILE_NAME),
            data_dir,
            service_domain: DEFAULT_SERVICE_DOMAIN.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolves the configuration from the environment.
    ///
    /// - `WIKISEARCH_DATA_DIR` overrides the platform data directory
    /// - `WIKISEARCH_CONFIG_DIR` overrides the platform config directory
    /// - `WIKISEARCH_SERVICE_DOMAIN` overrides `wikipedia.org`
    /// - `WIKISEARCH_TIMEOUT_SECS` overrides the 30 second request timeout
    pub fn from_env() -> Self {
        let data_dir = env::var("WIKISEARCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| platform::get_data_dir());
        let config_dir = env::var("WIKISEARCH_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| platform::get_config_dir());

        let service_domain = env::var("WIKISEARCH_SERVICE_DOMAIN")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_DOMAIN.to_string());

        let timeout_secs = match env::var("WIKISEARCH_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!("ignoring invalid WIKISEARCH_TIMEOUT_SECS={:?}", raw);
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            history_path: data_dir.join(HISTORY_FILE_NAME),
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            data_dir,
            service_domain,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
