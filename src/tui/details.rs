//! Read-only details pane for the selected item

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::git::{StatusSummary, WorktreeRecord};
use crate::tui::item::{ItemDetail, ViewItem};
use crate::tui::theme::{theme, Theme};

/// Render the details of `item` (or a hint when nothing is selected) into `area`
pub fn render_details(frame: &mut Frame, area: Rect, item: Option<&ViewItem>) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(Span::styled(" Details ", t.title_style()));

    let paragraph = Paragraph::new(detail_lines(item, t))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Lines shown in the details pane
pub fn detail_lines(item: Option<&ViewItem>, t: &Theme) -> Vec<Line<'static>> {
    let Some(item) = item else {
        return vec![Line::from(Span::styled(
            "Select an item to view details",
            t.muted_style(),
        ))];
    };

    let mut lines = vec![
        Line::from(Span::styled(item.title.clone(), t.title_style())),
        Line::from(""),
    ];

    match &item.detail {
        ItemDetail::Worktree(record) => worktree_lines(record, t, &mut lines),
        ItemDetail::Text(text) => {
            if !text.is_empty() {
                lines.push(Line::from(Span::styled(text.clone(), t.muted_style())));
            }
        }
    }

    lines
}

fn worktree_lines(record: &WorktreeRecord, t: &Theme, lines: &mut Vec<Line<'static>>) {
    let label = |text: &'static str| {
        Line::from(Span::styled(
            text,
            t.muted_style().add_modifier(Modifier::BOLD),
        ))
    };
    let value = |text: String| Line::from(Span::styled(text, Style::default().fg(t.text)));

    lines.push(label("Path"));
    lines.push(value(record.path.display().to_string()));
    lines.push(Line::from(""));

    if record.is_bare() {
        lines.push(label("Type"));
        lines.push(value("Bare repository".to_string()));
        return;
    }

    if record.is_detached() {
        lines.push(label("State"));
        lines.push(value("Detached HEAD".to_string()));
        if !record.commit_hash.is_empty() {
            lines.push(Line::from(""));
            lines.push(label("Commit"));
            lines.push(value(record.commit_hash.clone()));
        }
    } else {
        lines.push(label("Branch"));
        lines.push(value(record.branch.clone()));
    }
    lines.push(Line::from(""));

    lines.push(label("Status"));
    lines.push(status_line(&record.status.unwrap_or_default(), t));
}

fn status_line(status: &StatusSummary, t: &Theme) -> Line<'static> {
    if status.is_clean() {
        return Line::from(Span::styled("✓ Clean", Style::default().fg(t.success)));
    }

    let parts = [
        (status.staged, "staged", t.success),
        (status.modified, "modified", t.error),
        (status.untracked, "untracked", t.text_muted),
    ];

    let mut spans = Vec::new();
    for (count, what, color) in parts.into_iter().filter(|(count, _, _)| *count > 0) {
        if !spans.is_empty() {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(
            format!("{} {}", count, what),
            Style::default().fg(color),
        ));
    }
    Line::from(spans)
}
