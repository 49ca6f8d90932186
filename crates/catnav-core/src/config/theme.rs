//! Colour theme.
//!
//! Colours are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use std::path::Path;

use serde::Deserialize;

use crate::catalog::ItemKind;
use crate::error::{CoreError, CoreResult};

/// Complete theme with per-component colour groups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub panel: PanelTheme,
    #[serde(default)]
    pub search: SearchBarTheme,
    #[serde(default)]
    pub breadcrumb: BreadcrumbTheme,
    #[serde(default)]
    pub basket: BasketTheme,
    #[serde(default)]
    pub statusbar: StatusBarTheme,
    #[serde(default)]
    pub popup: PopupTheme,
}

impl Theme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = crate::error::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

}

/// Catalog list colours, one per item kind.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelTheme {
    pub folder_fg: String,
    pub article_fg: String,
    pub container_fg: String,
    pub information_fg: String,
    pub back_fg: String,
    pub selected_fg: String,
    pub error_fg: String,
}

impl PanelTheme {
    pub fn kind_fg(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Folder => &self.folder_fg,
            ItemKind::Article => &self.article_fg,
            ItemKind::Container => &self.container_fg,
            ItemKind::Information => &self.information_fg,
        }
    }
}

impl Default for PanelTheme {
    fn default() -> Self {
        Self {
            folder_fg: "blue".to_string(),
            article_fg: "white".to_string(),
            container_fg: "cyan".to_string(),
            information_fg: "magenta".to_string(),
            back_fg: "dark_gray".to_string(),
            selected_fg: "yellow".to_string(),
            error_fg: "red".to_string(),
        }
    }
}

/// Search bar colours.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBarTheme {
    pub border_fg: String,
    pub active_border_fg: String,
    pub placeholder_fg: String,
}

impl Default for SearchBarTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            active_border_fg: "yellow".to_string(),
            placeholder_fg: "dark_gray".to_string(),
        }
    }
}

/// Breadcrumb path colours.
#[derive(Debug, Clone, Deserialize)]
pub struct BreadcrumbTheme {
    pub bg: String,
    pub root_fg: String,
    pub separator_fg: String,
    pub component_fg: String,
    pub search_fg: String,
}

impl Default for BreadcrumbTheme {
    fn default() -> Self {
        Self {
            bg: "dark_gray".to_string(),
            root_fg: "cyan".to_string(),
            separator_fg: "gray".to_string(),
            component_fg: "white".to_string(),
            search_fg: "yellow".to_string(),
        }
    }
}

/// Basket panel colours.
#[derive(Debug, Clone, Deserialize)]
pub struct BasketTheme {
    pub border_fg: String,
    pub title_fg: String,
    pub variant_fg: String,
}

impl Default for BasketTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            title_fg: "green".to_string(),
            variant_fg: "dark_gray".to_string(),
        }
    }
}

/// Status bar colours.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarTheme {
    pub bg: String,
    pub position_fg: String,
    pub mode_fg: String,
    pub message_fg: String,
    pub loading_fg: String,
}

impl Default for StatusBarTheme {
    fn default() -> Self {
        Self {
            bg: "white".to_string(),
            position_fg: "black".to_string(),
            mode_fg: "blue".to_string(),
            message_fg: "magenta".to_string(),
            loading_fg: "yellow".to_string(),
        }
    }
}

/// Popup/dialog colours.
#[derive(Debug, Clone, Deserialize)]
pub struct PopupTheme {
    pub border_fg: String,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
        }
    }
}

/// Parses a colour string into a `ratatui::style::Color`.
///
/// Supports named colours (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .unwrap_or(0)
            };
            Color::Rgb(channel(1..3), channel(3..5), channel(5..7))
        }
        _ => Color::Reset,
    }
}
