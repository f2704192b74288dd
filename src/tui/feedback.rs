//! Transient feedback line
//!
//! Each message gets a generation number. A clear request carrying an older
//! generation is ignored, so a late timer never wipes a newer message.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::theme::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

impl FeedbackKind {
    pub fn icon(self) -> &'static str {
        match self {
            FeedbackKind::Success => "✓ ",
            FeedbackKind::Error => "✗ ",
            FeedbackKind::Info => "ℹ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub kind: FeedbackKind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Feedback {
    current: Option<FeedbackMessage>,
    generation: u64,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current message, returning its generation
    pub fn show(&mut self, kind: FeedbackKind, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.current = Some(FeedbackMessage {
            kind,
            text: text.into(),
        });
        self.generation
    }

    pub fn current(&self) -> Option<&FeedbackMessage> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear only if `generation` is still the newest; returns whether it cleared
    pub fn clear_if(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.current else {
            return;
        };
        let t = theme();
        let (bg, fg) = match message.kind {
            FeedbackKind::Success => (t.success, t.on_success),
            FeedbackKind::Error => (t.error, t.on_error),
            FeedbackKind::Info => (t.info, t.on_info),
        };
        let line = Line::from(Span::styled(
            format!(" {}{} ", message.kind.icon(), message.text),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}
