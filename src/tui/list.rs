//! Scrollable, selectable list surface
//!
//! Owns the items and the selection index. Geometry is assigned by the engine on resize;
//! pointer hit-testing uses the last assigned rectangle.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::item::ViewItem;
use crate::tui::layout::rect_contains;
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selection_line;

#[derive(Debug, Default)]
pub struct ListSurface {
    items: Vec<ViewItem>,
    selected: usize,
    /// First visible row
    offset: usize,
    /// Outer rectangle including the border
    area: Rect,
}

impl ListSurface {
    pub fn new(items: Vec<ViewItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    /// Replace the backing sequence, clamping the selection into the new bounds
    pub fn set_items(&mut self, items: Vec<ViewItem>) {
        self.items = items;
        if self.items.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
        self.scroll_into_view();
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.scroll_into_view();
    }

    pub fn selected_item(&self) -> Option<&ViewItem> {
        self.items.get(self.selected)
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.scroll_into_view();
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_into_view();
        }
    }

    /// Move forward by one page; a zero-height viewport still moves by one row
    pub fn page_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.set_selected(self.selected.saturating_add(self.page_size()));
    }

    pub fn page_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.set_selected(self.selected.saturating_sub(self.page_size()));
    }

    /// Rows moved by one page
    pub fn page_size(&self) -> usize {
        usize::from(self.visible_rows()).max(1)
    }

    fn visible_rows(&self) -> u16 {
        self.area.height.saturating_sub(2)
    }

    fn inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.area)
    }

    /// Assign the on-screen rectangle (border included)
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.scroll_into_view();
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    fn scroll_into_view(&mut self) {
        let rows = usize::from(self.visible_rows());
        if rows == 0 {
            self.offset = self.selected;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    /// Handle a navigation key; returns whether the key was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => self.set_selected(0),
            KeyCode::End => self.set_selected(usize::MAX),
            _ => return false,
        }
        true
    }

    /// Handle a pointer event; returns whether the selection may have changed
    ///
    /// Clicks select the row under the pointer and are ignored outside the list. Wheel
    /// events step the selection; the caller decides which region they may come from.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inner = self.inner();
                if !rect_contains(inner, mouse.column, mouse.row) {
                    return false;
                }
                let index = self.offset + usize::from(mouse.row - inner.y);
                if index < self.items.len() {
                    self.set_selected(index);
                    return true;
                }
                false
            }
            MouseEventKind::ScrollDown => {
                self.move_down();
                true
            }
            MouseEventKind::ScrollUp => {
                self.move_up();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, title: &str) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
            .title(Span::styled(format!(" {} ", title), t.title_style()));
        let inner = block.inner(self.area);
        frame.render_widget(block, self.area);

        if self.items.is_empty() {
            let empty = Paragraph::new(Span::styled(
                " No items",
                t.muted_style().add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(usize::from(inner.height))
            .map(|(i, item)| selection_line(&item.title, i == self.selected, inner.width, t))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
