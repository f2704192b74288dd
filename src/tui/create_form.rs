//! Worktree creation form modal
//!
//! Three fields: branch name, destination path and the "create new branch" checkbox.
//! Each text field keeps its own cursor. Validation failures keep the form open with
//! all input intact.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::layout::centered_rect;
use crate::tui::theme::theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Branch,
    Path,
    CreateNewBranch,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Branch => FormField::Path,
            FormField::Path => FormField::CreateNewBranch,
            FormField::CreateNewBranch => FormField::Branch,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Branch => FormField::CreateNewBranch,
            FormField::Path => FormField::Branch,
            FormField::CreateNewBranch => FormField::Path,
        }
    }
}

/// Single-line text input; the cursor counts characters, not bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| !c.is_control()) {
            self.insert(c);
        }
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Value with a bar drawn at the cursor
    fn with_cursor(&self) -> String {
        let at = self.byte_index(self.cursor);
        format!("{}│{}", &self.value[..at], &self.value[at..])
    }
}

/// Values collected by a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub branch: String,
    pub path: String,
    pub create_branch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Cancelled,
    Submitted(CreateRequest),
}

#[derive(Debug, Clone)]
pub struct CreateForm {
    focused: FormField,
    branch: TextField,
    path: TextField,
    create_branch: bool,
    error: Option<String>,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            focused: FormField::Branch,
            branch: TextField::default(),
            path: TextField::default(),
            create_branch: true,
            error: None,
        }
    }
}

impl CreateForm {
    /// Empty form in "create new branch" mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with values, focused on the path
    pub fn prefilled(branch: &str, path: &str, create_branch: bool) -> Self {
        Self {
            focused: FormField::Path,
            branch: TextField::with_value(branch),
            path: TextField::with_value(path),
            create_branch,
            error: None,
        }
    }

    pub fn focused(&self) -> FormField {
        self.focused
    }

    pub fn branch(&self) -> &TextField {
        &self.branch
    }

    pub fn path(&self) -> &TextField {
        &self.path
    }

    pub fn create_branch(&self) -> bool {
        self.create_branch
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focused {
            FormField::Branch => Some(&mut self.branch),
            FormField::Path => Some(&mut self.path),
            FormField::CreateNewBranch => None,
        }
    }

    /// Insert pasted text at the cursor of the focused text field
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_text() {
            field.insert_str(text);
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.branch.value().trim().is_empty() {
            return Err(if self.create_branch {
                "Branch name is required"
            } else {
                "Existing branch name is required"
            });
        }
        if self.path.value().trim().is_empty() {
            return Err("Path is required");
        }
        Ok(())
    }

    fn submit(&mut self) -> FormOutcome {
        match self.validate() {
            Ok(()) => {
                self.error = None;
                FormOutcome::Submitted(CreateRequest {
                    branch: self.branch.value().to_string(),
                    path: self.path.value().to_string(),
                    create_branch: self.create_branch,
                })
            }
            Err(message) => {
                self.error = Some(message.to_string());
                FormOutcome::Pending
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab => self.focused = self.focused.next(),
            KeyCode::BackTab => self.focused = self.focused.prev(),
            KeyCode::Char(' ') if self.focused == FormField::CreateNewBranch => {
                self.create_branch = !self.create_branch;
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(field) = self.focused_text() {
                    field.insert(c);
                }
            }
            code => {
                if let Some(field) = self.focused_text() {
                    match code {
                        KeyCode::Backspace => field.backspace(),
                        KeyCode::Delete => field.delete(),
                        KeyCode::Left => field.move_left(),
                        KeyCode::Right => field.move_right(),
                        KeyCode::Home => field.move_home(),
                        KeyCode::End => field.move_end(),
                        _ => {}
                    }
                }
            }
        }
        FormOutcome::Pending
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let label = |text: &'static str| Line::from(Span::styled(text, t.muted_style()));
        let input = |field: &TextField, focused: bool| {
            let (text, style) = if focused {
                (
                    field.with_cursor(),
                    Style::default().fg(t.primary).add_modifier(Modifier::BOLD),
                )
            } else {
                (field.value().to_string(), Style::default().fg(t.text))
            };
            Line::from(vec![
                Span::styled("› ", style),
                Span::styled(text, Style::default().fg(t.text)),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled("Create New Worktree", t.title_style())),
            Line::from(""),
            label(if self.create_branch {
                "Branch name:"
            } else {
                "Existing branch:"
            }),
            input(&self.branch, self.focused == FormField::Branch),
            Line::from(""),
            label("Worktree path:"),
            input(&self.path, self.focused == FormField::Path),
            Line::from(""),
        ];

        let checkbox = format!(
            "{} Create new branch",
            if self.create_branch { "[✓]" } else { "[ ]" }
        );
        let checkbox_style = if self.focused == FormField::CreateNewBranch {
            Style::default().fg(t.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.text)
        };
        lines.push(Line::from(Span::styled(checkbox, checkbox_style)));

        if let Some(error) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("✗ {}", error), t.error_style())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab: next field • Space: toggle • Enter: create • Esc: cancel",
            t.help_style(),
        )));

        let popup = centered_rect(68, lines.len() as u16 + 2, area);
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn type_str(form: &mut CreateForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_defaults() {
        let form = CreateForm::new();
        assert_eq!(form.focused(), FormField::Branch);
        assert!(form.create_branch());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_empty_branch_rejected_and_input_kept() {
        let mut form = CreateForm::new();
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "/tmp/wt");

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Branch name is required"));
        assert_eq!(form.path().value(), "/tmp/wt");
    }

    #[test]
    fn test_empty_existing_branch_rejected() {
        let mut form = CreateForm::new();
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), FormField::CreateNewBranch);
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(!form.create_branch());

        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.error(), Some("Existing branch name is required"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut form = CreateForm::new();
        type_str(&mut form, "feature");
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.error(), Some("Path is required"));
        assert_eq!(form.branch().value(), "feature");
    }

    #[test]
    fn test_whitespace_only_fields_rejected() {
        for create_branch in [true, false] {
            let mut form = CreateForm::prefilled("  ", "/tmp/wt", create_branch);
            assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
            let expected = if create_branch {
                "Branch name is required"
            } else {
                "Existing branch name is required"
            };
            assert_eq!(form.error(), Some(expected));
            assert_eq!(form.branch().value(), "  ");
        }

        let mut form = CreateForm::prefilled("feature", " \t", true);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Path is required"));
    }

    #[test]
    fn test_submit_yields_values_unmodified() {
        for create_branch in [true, false] {
            let mut form = CreateForm::new();
            type_str(&mut form, "feat x");
            form.handle_key(key(KeyCode::Tab));
            type_str(&mut form, " ../wt ");
            if !create_branch {
                form.handle_key(key(KeyCode::Tab));
                form.handle_key(key(KeyCode::Char(' ')));
            }

            assert_eq!(
                form.handle_key(key(KeyCode::Enter)),
                FormOutcome::Submitted(CreateRequest {
                    branch: "feat x".to_string(),
                    path: " ../wt ".to_string(),
                    create_branch,
                })
            );
        }
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut form = CreateForm::new();
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused(), FormField::Branch);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), FormField::CreateNewBranch);
    }

    #[test]
    fn test_cursors_are_independent() {
        let mut form = CreateForm::new();
        type_str(&mut form, "abc");
        form.handle_key(key(KeyCode::Left));
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "xy");
        form.handle_key(key(KeyCode::BackTab));
        type_str(&mut form, "Z");

        assert_eq!(form.branch().value(), "abZc");
        assert_eq!(form.path().value(), "xy");
        assert_eq!(form.path().cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete_at_cursor() {
        let mut field = TextField::with_value("héllo");
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "hélo");
        field.move_home();
        field.delete();
        assert_eq!(field.value(), "élo");
        field.move_home();
        field.backspace();
        assert_eq!(field.value(), "élo");
    }

    #[test]
    fn test_space_in_text_field_is_inserted() {
        let mut form = CreateForm::new();
        type_str(&mut form, "a b");
        assert_eq!(form.branch().value(), "a b");
        assert!(form.create_branch());
    }

    #[test]
    fn test_paste_goes_to_focused_text_field() {
        let mut form = CreateForm::new();
        form.handle_key(key(KeyCode::Tab));
        form.paste("/code/app-x\n");
        assert_eq!(form.path().value(), "/code/app-x");

        form.handle_key(key(KeyCode::Tab));
        form.paste("ignored");
        assert_eq!(form.path().value(), "/code/app-x");
        assert_eq!(form.branch().value(), "");
    }

    #[test]
    fn test_prefilled() {
        let form = CreateForm::prefilled("release", "/code/app-release", false);
        assert_eq!(form.focused(), FormField::Path);
        assert_eq!(form.path().cursor(), "/code/app-release".len());
        assert!(!form.create_branch());
    }

    #[test]
    fn test_ctrl_chars_not_inserted() {
        let mut form = CreateForm::new();
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(form.branch().value(), "");
    }
}
