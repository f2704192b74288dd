//! Tab bar

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::theme::theme;

/// Horizontal padding on each side of a tab label
const TAB_PADDING: u16 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Worktrees,
    Branches,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Worktrees, Tab::Branches, Tab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Worktrees => "Worktrees",
            Tab::Branches => "Branches",
            Tab::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether this tab shows a selectable list
    pub fn has_list(self) -> bool {
        matches!(self, Tab::Worktrees | Tab::Branches)
    }

    /// Horizontal extent `[start, end)` of this tab's label on the tab row
    pub fn span(self) -> (u16, u16) {
        let mut start = 0;
        for tab in Self::ALL {
            let width = tab.title().len() as u16 + 2 * TAB_PADDING;
            if tab == self {
                return (start, start + width);
            }
            start += width;
        }
        (start, start)
    }

    /// Tab whose label covers `column`
    pub fn at_column(column: u16) -> Option<Tab> {
        Self::ALL.into_iter().find(|tab| {
            let (start, end) = tab.span();
            column >= start && column < end
        })
    }
}

/// Render the tab labels and an underline across `area`
pub fn render_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let t = theme();
    let pad = " ".repeat(usize::from(TAB_PADDING));

    let labels: Vec<Span> = Tab::ALL
        .into_iter()
        .map(|tab| {
            let style = if tab == active {
                Style::default().fg(t.primary).add_modifier(Modifier::BOLD)
            } else {
                t.muted_style()
            };
            Span::styled(format!("{}{}{}", pad, tab.title(), pad), style)
        })
        .collect();

    let underline = Span::styled("─".repeat(usize::from(area.width)), t.border_style());
    let paragraph = Paragraph::new(vec![Line::from(labels), Line::from(underline)]);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Tab::Worktrees.next(), Tab::Branches);
        assert_eq!(Tab::Settings.next(), Tab::Worktrees);
        assert_eq!(Tab::Worktrees.prev(), Tab::Settings);
        assert_eq!(Tab::Branches.prev(), Tab::Worktrees);
    }

    #[test]
    fn test_spans() {
        assert_eq!(Tab::Worktrees.span(), (0, 13));
        assert_eq!(Tab::Branches.span(), (13, 25));
        assert_eq!(Tab::Settings.span(), (25, 37));
    }

    #[test]
    fn test_at_column() {
        assert_eq!(Tab::at_column(0), Some(Tab::Worktrees));
        assert_eq!(Tab::at_column(12), Some(Tab::Worktrees));
        assert_eq!(Tab::at_column(13), Some(Tab::Branches));
        assert_eq!(Tab::at_column(30), Some(Tab::Settings));
        assert_eq!(Tab::at_column(37), None);
    }

    #[test]
    fn test_has_list() {
        assert!(Tab::Worktrees.has_list());
        assert!(Tab::Branches.has_list());
        assert!(!Tab::Settings.has_list());
    }
}
