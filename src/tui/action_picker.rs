//! Action picker modal
//!
//! A short menu of things to do with one list item. Closing the picker drops it, so no
//! state survives from one showing to the next.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::item::ViewItem;
use crate::tui::layout::centered_rect;
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selection_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    /// Open the worktree in a new terminal
    Open,
    /// Show the `cd` command for the worktree
    CopyPath,
    /// Remove the worktree (after confirmation)
    Delete,
    /// Create a worktree for a branch
    NewWorktree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: ActionId,
    pub label: &'static str,
    pub description: &'static str,
}

/// Actions offered for a worktree
pub fn worktree_actions() -> Vec<Action> {
    vec![
        Action {
            id: ActionId::Open,
            label: "Open",
            description: "Open worktree in new terminal",
        },
        Action {
            id: ActionId::CopyPath,
            label: "Copy Path",
            description: "Show the cd command for this worktree",
        },
        Action {
            id: ActionId::Delete,
            label: "Delete",
            description: "Remove this worktree",
        },
    ]
}

/// Actions offered for a branch
pub fn branch_actions() -> Vec<Action> {
    vec![Action {
        id: ActionId::NewWorktree,
        label: "New worktree",
        description: "Check this branch out in a new worktree",
    }]
}

/// Result of feeding a key to the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Still open
    Pending,
    Cancelled,
    Chosen { action: ActionId, subject: ViewItem },
}

#[derive(Debug, Clone)]
pub struct ActionPicker {
    subject: ViewItem,
    actions: Vec<Action>,
    selected: usize,
}

impl ActionPicker {
    pub fn new(subject: ViewItem, actions: Vec<Action>) -> Self {
        Self {
            subject,
            actions,
            selected: 0,
        }
    }

    pub fn subject(&self) -> &ViewItem {
        &self.subject
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<&Action> {
        self.actions.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.actions.len() {
            self.selected += 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Esc => PickerOutcome::Cancelled,
            KeyCode::Enter => match self.selected_action() {
                Some(action) => PickerOutcome::Chosen {
                    action: action.id,
                    subject: self.subject.clone(),
                },
                None => PickerOutcome::Pending,
            },
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                PickerOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                PickerOutcome::Pending
            }
            _ => PickerOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Actions: {}", self.subject.title),
                t.title_style(),
            )),
            Line::from(""),
        ];

        let width = 44;
        for (i, action) in self.actions.iter().enumerate() {
            let selected = i == self.selected;
            lines.push(selection_line(action.label, selected, width - 4, t));
            if selected && !action.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", action.description),
                    t.muted_style().add_modifier(Modifier::ITALIC),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑/↓: navigate • Enter: select • Esc: cancel",
            t.help_style(),
        )));

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(width, height, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .padding(ratatui::widgets::Padding::horizontal(1)),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> ActionPicker {
        ActionPicker::new(ViewItem::from_branch("main"), worktree_actions())
    }

    #[test]
    fn test_selection_clamps() {
        let mut p = picker();
        p.move_up();
        assert_eq!(p.selected(), 0);
        for _ in 0..5 {
            p.move_down();
        }
        assert_eq!(p.selected(), 2);
        assert_eq!(p.selected_action().unwrap().id, ActionId::Delete);
    }

    #[test]
    fn test_enter_resolves_to_selected_action_and_subject() {
        let mut p = picker();
        p.handle_key(KeyEvent::from(KeyCode::Char('j')));
        let outcome = p.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(
            outcome,
            PickerOutcome::Chosen {
                action: ActionId::CopyPath,
                subject: ViewItem::from_branch("main"),
            }
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut p = picker();
        assert_eq!(
            p.handle_key(KeyEvent::from(KeyCode::Esc)),
            PickerOutcome::Cancelled
        );
    }

    #[test]
    fn test_enter_with_no_actions_stays_open() {
        let mut p = ActionPicker::new(ViewItem::from_branch("x"), Vec::new());
        assert_eq!(
            p.handle_key(KeyEvent::from(KeyCode::Enter)),
            PickerOutcome::Pending
        );
    }
}
