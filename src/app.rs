//! App Core for WikiSearch.
//!
//! Central struct holding the session, the search controller and the
//! settings engine, and managing the application lifecycle.

use crate::managers::history_manager::HistoryLogTrait;
use crate::services::article_store::{ArticleStore, WikipediaClient};
use crate::services::search_controller::SearchController;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::{Palette, ThemeEngine};
use crate::types::article::{DeepLink, ReplayOutcome, SearchOutcome};
use crate::types::config::AppConfig;
use crate::types::errors::{LookupError, SessionError, SettingsError};
use crate::types::history::HistoryEntry;
use crate::types::language::Language;
use crate::types::session::Session;
use crate::types::settings::Settings;

/// Central application struct. Presentation layers (the console front-end
/// and the RPC server) talk to the core only through this type.
pub struct App {
    pub config: AppConfig,
    pub session: Session,
    pub controller: SearchController,
    pub settings_engine: SettingsEngine,
    pub theme_engine: ThemeEngine,
}

impl App {
    /// Creates an App that looks articles up through `store`.
    pub fn new(config: AppConfig, store: Box<dyn ArticleStore>) -> Self {
        let controller = SearchController::new(store, config.data_dir.clone())
            .with_history_file(config.history_path.clone())
            .with_service_domain(config.service_domain.clone());
        let settings_engine =
            SettingsEngine::new(Some(config.settings_path.to_string_lossy().to_string()));

        Self {
            config,
            session: Session::default(),
            controller,
            settings_engine,
            theme_engine: ThemeEngine::new(),
        }
    }

    /// Creates an App backed by the live Wikipedia API.
    pub fn with_wikipedia(config: AppConfig) -> Result<Self, LookupError> {
        let client = WikipediaClient::new(&config.service_domain, config.request_timeout)?;
        Ok(Self::new(config, Box::new(client)))
    }

    /// Startup sequence: load settings, then history. Neither can fail the start.
    pub fn startup(&mut self) {
        self.session.settings = self.settings_engine.load();

        match self.controller.load_history() {
            Ok(count) => tracing::info!("loaded {} history entries", count),
            Err(e) => tracing::warn!("starting with empty history: {}", e),
        }
    }

    /// Shutdown sequence: flush history and settings, best effort.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.controller.save_history() {
            tracing::warn!("history not saved on exit: {}", e);
        }
        let settings = self.session.settings.clone();
        if let Err(e) = self.settings_engine.save(&settings) {
            tracing::warn!("settings not saved on exit: {}", e);
        }
    }

    pub fn language(&self) -> Language {
        self.session.language
    }

    /// Switches the wiki edition used by later searches.
    pub fn set_language(&mut self, code: &str) -> Result<Language, SessionError> {
        let language = Language::parse(code)
            .ok_or_else(|| SessionError::UnsupportedLanguage(code.to_string()))?;
        self.session.language = language;
        Ok(language)
    }

    /// Searches in the current language. History records the language label ("EN").
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        let label = self.session.language.label();
        self.controller.search(query, label)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.controller.history().all()
    }

    /// Opens the history entry at `index` and makes its language current.
    pub fn open_history(&mut self, index: usize) -> Option<(HistoryEntry, ReplayOutcome)> {
        let entry = self.controller.history().get(index)?.clone();
        if let Some(language) = Language::parse(&entry.language_code) {
            self.session.language = language;
        }
        let outcome = self.controller.replay(&entry);
        Some((entry, outcome))
    }

    /// Browser links for a disambiguation option, in the current language.
    pub fn resolve_option(&self, title: &str) -> DeepLink {
        self.controller
            .resolve_option(title, self.session.language.code())
    }

    /// Applies new display settings and saves them.
    ///
    /// Invalid settings are rejected and change nothing. If only the save
    /// fails, the new settings stay in effect for this session and the
    /// error is returned for the caller to report.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        SettingsEngine::validate(&settings)?;
        self.session.settings = settings.clone();
        self.settings_engine.save(&settings).map_err(|e| {
            tracing::warn!("settings applied but not saved: {}", e);
            e
        })
    }

    pub fn reset_settings(&mut self) -> Result<(), SettingsError> {
        self.update_settings(Settings::default())
    }

    pub fn palette(&self) -> Palette {
        self.theme_engine.palette(&self.session.settings)
    }
}
