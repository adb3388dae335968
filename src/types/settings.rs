use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "Segoe Script";
pub const DEFAULT_FONT_SIZE_PT: u32 = 12;
pub const DEFAULT_BG_COLOR: &str = "#2e3440";

/// Display preferences shared by every text view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub font_family: String,
    pub font_size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    /// Window background, always `"#RRGGBB"`.
    pub background_color_hex: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            bold: false,
            italic: false,
            background_color_hex: DEFAULT_BG_COLOR.to_string(),
        }
    }
}
