// pager-tab-strip/src/widgets/tab_strip/style_config.rs
use ratatui::{
    style::{Color, Modifier, Style},
    symbols,
};
use serde::{Deserialize, Serialize};

use super::TabStripResult;
use crate::tui_theme;

/// Font style applied to tab titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypefaceStyle {
    Normal,
    #[default]
    Bold,
    Italic,
    BoldItalic,
}

impl TypefaceStyle {
    pub fn modifier(self) -> Modifier {
        match self {
            TypefaceStyle::Normal => Modifier::empty(),
            TypefaceStyle::Bold => Modifier::BOLD,
            TypefaceStyle::Italic => Modifier::ITALIC,
            TypefaceStyle::BoldItalic => Modifier::BOLD | Modifier::ITALIC,
        }
    }
}

/// Visual parameters of a [`TabStrip`](crate::TabStrip).
///
/// Horizontal sizes are in columns, vertical sizes in rows. Missing fields
/// fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub indicator_color: Color,
    pub indicator_height: u16,
    pub underline_color: Color,
    pub underline_height: u16,
    pub divider_color: Color,
    pub divider_width: u16,
    pub divider_padding: u16,
    pub text_color: Color,
    pub typeface: TypefaceStyle,
    pub text_all_caps: bool,
    /// Padding on each side of a tab's content.
    pub tab_padding: u16,
    pub tab_background: Style,
    /// Spread spare width evenly across the tabs.
    pub should_expand: bool,
    /// Margin kept to the left of the selected tab when the strip scrolls.
    pub scroll_offset: u16,
    pub icon_size: u16,
    /// Lifts the indicator line off the bottom edge.
    pub line_padding_from_bottom: u16,
    /// Size icon+text tabs to an equal share of the screen width.
    pub fit_window: bool,
    pub indicator_symbol: String,
    pub underline_symbol: String,
    pub divider_symbol: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            indicator_color: tui_theme::INDICATOR_DEFAULT,
            indicator_height: 1,
            underline_color: tui_theme::UNDERLINE_DEFAULT,
            underline_height: 1,
            divider_color: tui_theme::DIVIDER_DEFAULT,
            divider_width: 1,
            divider_padding: 0,
            text_color: tui_theme::TAB_TEXT_DEFAULT,
            typeface: TypefaceStyle::default(),
            text_all_caps: true,
            tab_padding: 2,
            tab_background: Style::default(),
            should_expand: false,
            scroll_offset: 8,
            icon_size: 1,
            line_padding_from_bottom: 0,
            fit_window: false,
            indicator_symbol: symbols::line::THICK_HORIZONTAL.to_string(),
            underline_symbol: symbols::line::HORIZONTAL.to_string(),
            divider_symbol: symbols::line::VERTICAL.to_string(),
        }
    }
}

impl StyleConfig {
    pub fn from_json(json: &str) -> TabStripResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TabStripResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Style of tab titles (color plus typeface).
    pub fn text_style(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .add_modifier(self.typeface.modifier())
    }

    /// Rows at the bottom of the strip taken by the indicator and underline.
    pub fn reserved_rows(&self) -> u16 {
        (self.indicator_height + self.line_padding_from_bottom).max(self.underline_height)
    }
}
