// WikiSearch Settings Engine
// Loads and saves the display preferences (font and background color).
// Settings are stored as a `[SETTINGS]` section in a TOML file at the platform config path.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::platform;
use crate::services::theme_engine::is_rrggbb;
use crate::types::config::SETTINGS_FILE_NAME;
use crate::types::errors::SettingsError;
use crate::types::settings::Settings;

const SECTION: &str = "SETTINGS";
const MAX_FONT_SIZE_PT: u32 = 512;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Settings;
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &Settings;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: Settings,
}

/// On-disk layout of the settings file.
#[derive(Serialize)]
struct SettingsFile<'a> {
    #[serde(rename = "SETTINGS")]
    settings: SettingsSection<'a>,
}

#[derive(Serialize)]
struct SettingsSection<'a> {
    font_family: &'a str,
    font_size: u32,
    font_bold: bool,
    font_italic: bool,
    bg_color: &'a str,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.cfg`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join(SETTINGS_FILE_NAME)
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    /// Checks that `settings` can be written and read back unchanged.
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        if settings.font_family.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "font_family cannot be empty".to_string(),
            ));
        }
        if settings.font_size_pt == 0 || settings.font_size_pt > MAX_FONT_SIZE_PT {
            return Err(SettingsError::InvalidValue(format!(
                "font_size must be between 1 and {}: {}",
                MAX_FONT_SIZE_PT, settings.font_size_pt
            )));
        }
        if !is_rrggbb(&settings.background_color_hex) {
            return Err(SettingsError::InvalidValue(format!(
                "bg_color must be #RRGGBB: {}",
                settings.background_color_hex
            )));
        }
        Ok(())
    }

    /// Renders `settings` in the on-disk format.
    pub fn to_file_contents(settings: &Settings) -> Result<String, SettingsError> {
        let file = SettingsFile {
            settings: SettingsSection {
                font_family: &settings.font_family,
                font_size: settings.font_size_pt,
                font_bold: settings.bold,
                font_italic: settings.italic,
                bg_color: &settings.background_color_hex,
            },
        };
        toml::to_string(&file).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })
    }

    /// Parses settings file contents. Never fails: every field that is
    /// missing or malformed falls back to its default on its own.
    pub fn parse(content: &str) -> Settings {
        let defaults = Settings::default();
        let section = match parse_section(content) {
            Some(section) => section,
            None => {
                if !content.trim().is_empty() {
                    tracing::warn!("settings file has no [{}] section, using defaults", SECTION);
                }
                return defaults;
            }
        };

        Settings {
            font_family: field(&section, "font_family", as_font_family)
                .unwrap_or(defaults.font_family),
            font_size_pt: field(&section, "font_size", as_font_size)
                .unwrap_or(defaults.font_size_pt),
            bold: field(&section, "font_bold", as_bool).unwrap_or(defaults.bold),
            italic: field(&section, "font_italic", as_bool).unwrap_or(defaults.italic),
            background_color_hex: field(&section, "bg_color", as_color)
                .unwrap_or(defaults.background_color_hex),
        }
    }
}

/// Returns the `[SETTINGS]` table. Files that are not valid TOML (such as
/// unquoted `key = value` lines) are read line by line instead.
fn parse_section(content: &str) -> Option<toml::Table> {
    match content.parse::<toml::Table>() {
        Ok(mut table) => match table.remove(SECTION) {
            Some(toml::Value::Table(section)) => Some(section),
            _ => None,
        },
        Err(e) => {
            tracing::warn!("settings file is not valid TOML ({}), reading it leniently", e);
            parse_section_lenient(content)
        }
    }
}

fn parse_section_lenient(content: &str) -> Option<toml::Table> {
    let mut in_section = false;
    let mut found = false;
    let mut section = toml::Table::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = line[1..line.len() - 1].trim() == SECTION;
            found |= in_section;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once(['=', ':']) {
            let value = value.trim().trim_matches('"');
            section.insert(key.trim().to_string(), toml::Value::String(value.to_string()));
        }
    }

    found.then_some(section)
}

fn field<T>(
    section: &toml::Table,
    key: &str,
    convert: fn(&toml::Value) -> Option<T>,
) -> Option<T> {
    let value = section.get(key)?;
    let converted = convert(value);
    if converted.is_none() {
        tracing::warn!("ignoring malformed setting {} = {}", key, value);
    }
    converted
}

fn as_font_family(value: &toml::Value) -> Option<String> {
    let family = value.as_str()?.trim();
    (!family.is_empty()).then(|| family.to_string())
}

fn as_font_size(value: &toml::Value) -> Option<u32> {
    let size = match value {
        toml::Value::Integer(n) => u32::try_from(*n).ok()?,
        toml::Value::String(s) => s.trim().parse::<u32>().ok()?,
        _ => return None,
    };
    (1..=MAX_FONT_SIZE_PT).contains(&size).then_some(size)
}

fn as_bool(value: &toml::Value) -> Option<bool> {
    match value {
        toml::Value::Boolean(b) => Some(*b),
        toml::Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_color(value: &toml::Value) -> Option<String> {
    let color = value.as_str()?.trim();
    is_rrggbb(color).then(|| color.to_lowercase())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the config file.
    ///
    /// A missing or unreadable file yields default settings.
    fn load(&mut self) -> Settings {
        let path = Path::new(&self.config_path);

        self.settings = if !path.exists() {
            Settings::default()
        } else {
            match fs::read_to_string(path) {
                Ok(content) => Self::parse(&content),
                Err(e) => {
                    tracing::warn!("failed to read settings file {}: {}", self.config_path, e);
                    Settings::default()
                }
            }
        };

        self.settings.clone()
    }

    /// Validates and writes `settings`, creating parent directories as needed.
    /// The in-memory copy is only replaced once the write succeeded.
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        Self::validate(settings)?;
        let contents = Self::to_file_contents(settings)?;
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, contents)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        self.settings = settings.clone();
        Ok(())
    }

    fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.save(&Settings::default())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
