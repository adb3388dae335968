// WikiSearch platform paths
// Settings go to the per-user config directory; the history file and the
// saved articles go to the per-user data directory. The OS-specific module
// is chosen at compile time and re-exported as `os`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

/// Directory holding `settings.cfg`.
///
/// `~/.config/wikisearch` on Linux (XDG-aware), `~/Library/Application Support/WikiSearch`
/// on macOS and `%APPDATA%\WikiSearch` on Windows.
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Directory holding `previous_search.txt` and the `<query>_<code>.txt` articles.
///
/// `~/.local/share/wikisearch` on Linux (XDG-aware); the same directory as
/// the settings on macOS and Windows.
pub fn get_data_dir() -> PathBuf {
    os::get_data_dir()
}
