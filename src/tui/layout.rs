//! Screen geometry
//!
//! The frame is split into a tab bar, the two panes, a feedback row and a help row. The
//! engine recomputes this on every resize and hands each surface its rectangle.

use ratatui::prelude::*;

/// Rows used by the tab bar (labels plus underline)
pub const TAB_BAR_HEIGHT: u16 = 2;
/// Rows reserved outside the panes: tab bar, feedback row, help row
pub const CHROME_HEIGHT: u16 = TAB_BAR_HEIGHT + 2;
/// Share of the width given to the list pane
pub const LIST_WIDTH_PERCENT: u16 = 40;

/// Rectangles of every region of the main screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub tabs: Rect,
    /// Everything between the tab bar and the feedback row
    pub content: Rect,
    pub list: Rect,
    pub details: Rect,
    pub feedback: Rect,
    pub help: Rect,
}

impl ScreenLayout {
    /// Compute the layout for a `width` x `height` viewport
    ///
    /// The list gets 40% of the width, the details pane the rest minus a one-column gap.
    /// Both panes share the height left after chrome.
    pub fn new(width: u16, height: u16) -> Self {
        let pane_height = height.saturating_sub(CHROME_HEIGHT);
        let list_width = (u32::from(width) * u32::from(LIST_WIDTH_PERCENT) / 100) as u16;
        let details_width = width.saturating_sub(list_width).saturating_sub(1);
        let pane_y = TAB_BAR_HEIGHT.min(height);

        let content = Rect::new(0, pane_y, width, pane_height);
        let feedback_y = (pane_y + pane_height).min(height);
        let help_y = (feedback_y + 1).min(height);

        Self {
            tabs: Rect::new(0, 0, width, TAB_BAR_HEIGHT.min(height)),
            content,
            list: Rect::new(0, pane_y, list_width, pane_height),
            details: Rect::new(list_width + 1, pane_y, details_width, pane_height),
            feedback: Rect::new(0, feedback_y, width, u16::from(height > feedback_y)),
            help: Rect::new(0, help_y, width, u16::from(height > help_y)),
        }
    }
}

/// Check whether the cell at (`column`, `row`) lies inside `area`
pub fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Rectangle of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_split() {
        let layout = ScreenLayout::new(100, 30);
        assert_eq!(layout.list, Rect::new(0, 2, 40, 26));
        assert_eq!(layout.details, Rect::new(41, 2, 59, 26));
        assert_eq!(layout.feedback, Rect::new(0, 28, 100, 1));
        assert_eq!(layout.help, Rect::new(0, 29, 100, 1));
        assert_eq!(layout.list.height, layout.details.height);
    }

    #[test]
    fn test_tiny_viewport_does_not_underflow() {
        let layout = ScreenLayout::new(1, 2);
        assert_eq!(layout.list.height, 0);
        assert_eq!(layout.details.width, 0);
        assert_eq!(layout.help.height, 0);

        let layout = ScreenLayout::new(0, 0);
        assert_eq!(layout, ScreenLayout::new(0, 0));
        assert_eq!(layout.tabs.height, 0);
    }

    #[test]
    fn test_rect_contains() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(rect_contains(area, 2, 3));
        assert!(rect_contains(area, 5, 4));
        assert!(!rect_contains(area, 6, 4));
        assert!(!rect_contains(area, 2, 5));
        assert!(!rect_contains(Rect::default(), 0, 0));
    }

    #[test]
    fn test_centered_rect() {
        assert_eq!(
            centered_rect(20, 10, Rect::new(0, 0, 100, 30)),
            Rect::new(40, 10, 20, 10)
        );
        assert_eq!(
            centered_rect(200, 50, Rect::new(0, 0, 80, 24)),
            Rect::new(0, 0, 80, 24)
        );
    }
}
