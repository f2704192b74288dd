//! Explanation shown when the directory is not inside a repository

use ratatui::prelude::*;
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::tui::theme::{theme, Theme};

pub fn not_a_repository_lines(t: &Theme) -> Vec<Line<'static>> {
    let text = Style::default().fg(t.error);
    vec![
        Line::from(Span::styled(
            "Not a Git Repository",
            text.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This directory is not part of a git repository.",
            text,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please run this application from within a git repository to manage worktrees.",
            text,
        )),
        Line::from(""),
        Line::from(Span::styled("To initialize a git repository, run:", text)),
        Line::from(Span::styled("  git init", text)),
    ]
}

pub fn render_not_a_repository(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(not_a_repository_lines(theme()))
        .block(Block::default().padding(Padding::new(4, 4, 2, 0)))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
