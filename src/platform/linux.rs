// WikiSearch platform paths for Linux
// Config: ~/.config/wikisearch
// Data:   ~/.local/share/wikisearch

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "wikisearch";

fn resolve(xdg: Option<String>, home: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => {
            let mut path = PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")));
            for part in fallback {
                path.push(part);
            }
            path.join(APP_DIR)
        }
    }
}

/// Uses `$XDG_CONFIG_HOME/wikisearch` if set, otherwise `~/.config/wikisearch`.
pub fn get_config_dir() -> PathBuf {
    resolve(
        env::var("XDG_CONFIG_HOME").ok(),
        env::var("HOME").ok(),
        &[".config"],
    )
}

/// Uses `$XDG_DATA_HOME/wikisearch` if set, otherwise `~/.local/share/wikisearch`.
pub fn get_data_dir() -> PathBuf {
    resolve(
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
        &[".local", "share"],
    )
}
