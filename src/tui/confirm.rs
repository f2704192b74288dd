//! Confirmation dialog modal
//!
//! Every dialog starts with Cancel selected. `y` and `n` answer immediately without
//! moving the selection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::item::ViewItem;
use crate::tui::layout::centered_rect;
use crate::tui::theme::theme;

/// Index of the confirm button
pub const CONFIRM: usize = 0;
/// Index of the cancel button
pub const CANCEL: usize = 1;

/// What the dialog is asking about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmSubject {
    /// Remove this worktree
    DeleteWorktree(ViewItem),
    /// Prune stale worktree entries
    Prune,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Pending,
    Cancelled,
    Confirmed { force: bool, subject: ConfirmSubject },
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    title: String,
    message: String,
    confirm_label: String,
    cancel_label: String,
    /// Destructive action: drawn in the error color
    danger: bool,
    force_option: bool,
    force: bool,
    selected: usize,
    subject: ConfirmSubject,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>, subject: ConfirmSubject) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            danger: false,
            force_option: false,
            force: false,
            selected: CANCEL,
            subject,
        }
    }

    /// Dialog asking to remove the worktree behind `item`
    pub fn delete_worktree(item: ViewItem) -> Self {
        let message = format!(
            "This will remove the worktree '{}'.\nPath: {}",
            item.title, item.id
        );
        Self::new("Delete Worktree?", message, ConfirmSubject::DeleteWorktree(item))
            .with_confirm_label("Delete")
            .with_force_option()
            .danger()
    }

    /// Dialog asking to prune; `preview` is what a dry run reported, if anything
    pub fn prune(preview: Option<&str>) -> Self {
        let mut message =
            "This will remove worktree entries whose directories no longer exist.".to_string();
        if let Some(preview) = preview.filter(|p| !p.is_empty()) {
            message.push_str("\n\n");
            message.push_str(preview);
        }
        Self::new("Prune Stale Worktrees?", message, ConfirmSubject::Prune)
            .with_confirm_label("Prune")
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    /// Offer the force checkbox
    pub fn with_force_option(mut self) -> Self {
        self.force_option = true;
        self
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn subject(&self) -> &ConfirmSubject {
        &self.subject
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn has_force_option(&self) -> bool {
        self.force_option
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn move_left(&mut self) {
        self.selected = CONFIRM;
    }

    pub fn move_right(&mut self) {
        self.selected = CANCEL;
    }

    /// Flip the force flag; no-op unless the checkbox is offered
    pub fn toggle_force(&mut self) {
        if self.force_option {
            self.force = !self.force;
        }
    }

    fn confirmed(&self) -> ConfirmOutcome {
        ConfirmOutcome::Confirmed {
            force: self.force,
            subject: self.subject.clone(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ConfirmOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => ConfirmOutcome::Cancelled,
            KeyCode::Char('y') => self.confirmed(),
            KeyCode::Enter if self.selected == CONFIRM => self.confirmed(),
            KeyCode::Enter => ConfirmOutcome::Cancelled,
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.move_left();
                ConfirmOutcome::Pending
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                self.move_right();
                ConfirmOutcome::Pending
            }
            KeyCode::Char(' ') | KeyCode::Char('f') => {
                self.toggle_force();
                ConfirmOutcome::Pending
            }
            _ => ConfirmOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let accent = if self.danger { t.error } else { t.text };

        let mut lines = vec![
            Line::from(Span::styled(
                self.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            self.message
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(t.text)))),
        );
        lines.push(Line::from(""));

        if self.force_option {
            let checkbox = if self.force { "[x]" } else { "[ ]" };
            lines.push(Line::from(Span::styled(
                format!("{} Force removal (ignore uncommitted changes)", checkbox),
                Style::default().fg(t.text),
            )));
            lines.push(Line::from(""));
        }

        let active_bg = if self.danger { t.error } else { t.primary };
        let active_fg = if self.danger { t.on_error } else { t.on_primary };
        let button = |label: &str, active: bool| {
            let style = if active {
                Style::default()
                    .fg(active_fg)
                    .bg(active_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                t.muted_style()
            };
            Span::styled(format!("  {}  ", label), style)
        };
        lines.push(Line::from(vec![
            button(&self.confirm_label, self.selected == CONFIRM),
            Span::raw("  "),
            button(&self.cancel_label, self.selected == CANCEL),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "y/n: quick answer • ←/→: select • Enter: confirm • Esc: cancel",
            t.help_style(),
        )));

        let width = 70;
        let height = lines.len() as u16 + 2;
        let popup = centered_rect(width, height, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(if self.danger {
                            t.error
                        } else {
                            t.border
                        }))
                        .padding(ratatui::widgets::Padding::horizontal(1)),
                ),
            popup,
        );
    }
}
