//! Settings tab: where the configuration lives and what it currently says

use std::path::Path;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::config::{config_file_path, Config};
use crate::tui::theme::{theme, Theme};

pub fn settings_lines(config: &Config, repo_dir: &Path, t: &Theme) -> Vec<Line<'static>> {
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<20}", label), t.muted_style()),
            Span::styled(value, Style::default().fg(t.text)),
        ])
    };

    let config_path = config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".to_string());

    vec![
        row("Config file", config_path),
        row("Repository", repo_dir.display().to_string()),
        Line::from(""),
        row("Appearance", config.appearance.to_string()),
        row("After create", config.on_create.to_string()),
        row(
            "Feedback duration",
            format!("{} ms", config.feedback_duration_ms),
        ),
        row(
            "Terminal",
            config
                .terminal
                .clone()
                .unwrap_or_else(|| "auto-detect".to_string()),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Run `grove --init-config` to write a commented sample file.",
            t.help_style(),
        )),
    ]
}

pub fn render_settings(frame: &mut Frame, area: Rect, config: &Config, repo_dir: &Path) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(Span::styled(" Settings ", t.title_style()))
        .padding(Padding::new(2, 2, 1, 0));
    let paragraph = Paragraph::new(settings_lines(config, repo_dir, t))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OnCreate;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_shows_current_values() {
        let config = Config {
            on_create: OnCreate::Switch,
            terminal: Some("kitty".to_string()),
            ..Config::default()
        };
        let lines = text(&settings_lines(&config, Path::new("/code/app"), &Theme::default()));
        assert!(lines.iter().any(|l| l.contains("/code/app")));
        assert!(lines.iter().any(|l| l.starts_with("Appearance") && l.ends_with("dark")));
        assert!(lines.iter().any(|l| l.starts_with("After create") && l.ends_with("switch")));
        assert!(lines.iter().any(|l| l.ends_with("kitty")));
    }
}
