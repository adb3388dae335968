//! Theme Engine. Derives the colors the UI paints with from the background setting.

use serde::{Deserialize, Serialize};

use crate::types::errors::ThemeError;
use crate::types::settings::Settings;

/// Foreground text color used on every background.
pub const TEXT_COLOR: &str = "#eceff4";

const PANEL_FACTOR: f64 = 0.7;
const BORDER_FACTOR: f64 = 0.8;

/// Colors for one rendering of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Window and title bar background, `#RRGGBB`.
    pub background: String,
    /// Text areas, lists and inputs: the background darkened to 70%.
    pub panel: String,
    /// Tab borders: the background darkened to 80%.
    pub border: String,
    pub text: String,
}

/// Validates a hex color string (e.g. "#2e3440" or "#fff").
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Like [`is_valid_hex_color`] but only the 7-character `#RRGGBB` form.
pub fn is_rrggbb(color: &str) -> bool {
    color.len() == 7 && is_valid_hex_color(color)
}

fn parse_rgb(color: &str) -> Result<(u8, u8, u8), ThemeError> {
    if !is_valid_hex_color(color) {
        return Err(ThemeError::InvalidColor(color.to_string()));
    }
    let hex = &color[1..];
    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ThemeError::InvalidColor(color.to_string()))
    };
    if hex.len() == 3 {
        let expand = |i: usize| channel(&hex[i..=i].repeat(2));
        Ok((expand(0)?, expand(1)?, expand(2)?))
    } else {
        Ok((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?))
    }
}

/// Scales every channel of `color` by `factor`, as a CSS `rgb(r, g, b)` string.
pub fn darker(color: &str, factor: f64) -> Result<String, ThemeError> {
    let (r, g, b) = parse_rgb(color)?;
    let scale = |c: u8| (c as f64 * factor).floor() as u32;
    Ok(format!("rgb({}, {}, {})", scale(r), scale(g), scale(b)))
}

/// Stateless palette builder.
#[derive(Debug, Default)]
pub struct ThemeEngine;

impl ThemeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Builds the palette for `settings`. Settings always carry a valid color;
    /// if one slipped through anyway the default background is used.
    pub fn palette(&self, settings: &Settings) -> Palette {
        let background = if is_rrggbb(&settings.background_color_hex) {
            settings.background_color_hex.clone()
        } else {
            tracing::warn!(
                "invalid background color {:?}, using default",
                settings.background_color_hex
            );
            Settings::default().background_color_hex
        };

        // `background` is validated above, so these cannot fail.
        let panel = darker(&background, PANEL_FACTOR).unwrap_or_default();
        let border = darker(&background, BORDER_FACTOR).unwrap_or_default();

        Palette {
            background,
            panel,
            border,
            text: TEXT_COLOR.to_string(),
        }
    }
}
