//! Helper functions for consistent selection rendering across lists and menus.
//!
//! Selected rows get a `▸ ` marker and the accent background; other rows are indented by
//! the same width so titles line up.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::theme::Theme;

/// Returns the selection prefix for a row
///
/// # Example
/// ```
/// # use grove::tui::widgets::selection::selection_prefix;
/// assert_eq!(selection_prefix(true), "▸ ");
/// assert_eq!(selection_prefix(false), "  ");
/// ```
pub fn selection_prefix(is_selected: bool) -> &'static str {
    if is_selected {
        "▸ "
    } else {
        "  "
    }
}

/// Returns the row style for a selected/unselected entry
pub fn selection_style(is_selected: bool, theme: &Theme) -> Style {
    if is_selected {
        theme.selected_style()
    } else {
        Style::default().fg(theme.text)
    }
}

/// Build a full row: one space of padding, the prefix, then `label`
///
/// The selected row is padded to `width` so the highlight spans the pane.
pub fn selection_line(label: &str, is_selected: bool, width: u16, theme: &Theme) -> Line<'static> {
    let mut text = format!(" {}{}", selection_prefix(is_selected), label);
    if is_selected {
        let len = text.chars().count();
        let width = usize::from(width);
        if len < width {
            text.push_str(&" ".repeat(width - len));
        }
    }
    Line::from(Span::styled(text, selection_style(is_selected, theme)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn test_selection_style() {
        let theme = Theme::default();
        let selected = selection_style(true, &theme);
        let unselected = selection_style(false, &theme);

        assert_eq!(selected.bg, Some(theme.primary));
        assert!(selected.add_modifier.contains(Modifier::BOLD));
        assert_eq!(unselected.fg, Some(theme.text));
        assert!(unselected.bg.is_none());
    }

    #[test]
    fn test_selection_line_pads_selected_row() {
        let theme = Theme::default();
        let line = selection_line("main", true, 12, &theme);
        assert_eq!(line.spans[0].content, " ▸ main     ");

        let line = selection_line("main", false, 12, &theme);
        assert_eq!(line.spans[0].content, "   main");
    }
}
