//! Theme module for centralized color and style definitions
//!
//! Colors come from the configuration's adaptive palette, resolved once for the
//! configured appearance. Views only ever talk to [`theme()`].

use ratatui::style::{Color, Modifier, Style};

use crate::config::{AdaptiveColor, Appearance, Config, ThemeColors};

/// Application theme with all color definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Accent for selection and active states
    pub primary: Color,
    /// Text drawn on top of `primary`
    pub on_primary: Color,
    /// Text color for normal content
    pub text: Color,
    /// Text color for secondary content
    pub text_muted: Color,
    pub border: Color,

    pub success: Color,
    pub on_success: Color,
    pub error: Color,
    pub on_error: Color,
    pub info: Color,
    pub on_info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Theme {
    /// Resolve the configured palette for the configured appearance
    pub fn from_config(config: &Config) -> Self {
        Self::from_colors(&config.theme.colors, config.appearance)
    }

    /// Resolve `colors` for `appearance`
    ///
    /// Values that are not valid `#RRGGBB` fall back to a terminal color of the same role.
    pub fn from_colors(colors: &ThemeColors, appearance: Appearance) -> Self {
        let pick = |color: &AdaptiveColor, fallback: Color| {
            parse_hex(color.pick(appearance)).unwrap_or(fallback)
        };

        Self {
            primary: pick(&colors.primary, Color::Magenta),
            on_primary: pick(&colors.on_primary, Color::White),
            text: pick(&colors.text, Color::Reset),
            text_muted: pick(&colors.text_muted, Color::DarkGray),
            border: pick(&colors.border, Color::Magenta),
            success: pick(&colors.success, Color::Green),
            on_success: pick(&colors.on_success, Color::White),
            error: pick(&colors.error, Color::Red),
            on_error: pick(&colors.on_error, Color::White),
            info: pick(&colors.info, Color::Blue),
            on_info: pick(&colors.on_info, Color::White),
        }
    }

    // === Style Builders ===

    /// Style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for the selected row of a list
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.on_primary)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for pane borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the key help line
    pub fn help_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for inline error text
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

/// Parse `#RRGGBB` into an RGB color
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Install the theme used for the rest of the process
///
/// Only the first call has an effect.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#7D56F4"), Some(Color::Rgb(0x7D, 0x56, 0xF4)));
        assert_eq!(parse_hex(" #ffffff "), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex("7D56F4"), None);
        assert_eq!(parse_hex("#7D56F"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_theme_follows_appearance() {
        let mut config = Config::default();
        let dark = Theme::from_config(&config);
        assert_eq!(dark.primary, Color::Rgb(0x7D, 0x56, 0xF4));
        assert_eq!(dark.text, Color::Rgb(0xCC, 0xCC, 0xCC));

        config.appearance = Appearance::Light;
        let light = Theme::from_config(&config);
        assert_eq!(light.primary, Color::Rgb(0x87, 0x4B, 0xFD));
        assert_eq!(light.error, Color::Rgb(0xC6, 0x28, 0x28));
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let mut config = Config::default();
        config.theme.colors.success.dark = "green-ish".to_string();
        assert_eq!(Theme::from_config(&config).success, Color::Green);
    }

    #[test]
    fn test_selected_style_uses_primary() {
        let theme = Theme::default();
        let style = theme.selected_style();
        assert_eq!(style.bg, Some(theme.primary));
        assert_eq!(style.fg, Some(theme.on_primary));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
