//! Main input dispatch logic
//!
//! The quit chord is checked first and always wins. After that the live modal, if any,
//! claims every key; the tabs and lists only see keys when no modal is open. Pointer
//! events are dropped while a modal is open and are otherwise gated by surface geometry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{ActiveModal, App, Intent};
use crate::tui::action_picker::PickerOutcome;
use crate::tui::confirm::ConfirmOutcome;
use crate::tui::create_form::FormOutcome;
use crate::tui::layout::rect_contains;
use crate::tui::tabs::Tab;

/// Ctrl+C
pub fn is_quit_chord(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Route a key event, returning what the engine should do about it
pub fn route_key(app: &mut App, key: KeyEvent) -> Option<Intent> {
    if is_quit_chord(&key) {
        return Some(Intent::Quit);
    }

    if let Some(modal) = app.modals.active_mut() {
        return route_modal_key(modal, key);
    }

    route_base_key(app, key)
}

fn route_modal_key(modal: &mut ActiveModal, key: KeyEvent) -> Option<Intent> {
    match modal {
        ActiveModal::ConfirmDialog(dialog) => match dialog.handle_key(key) {
            ConfirmOutcome::Pending => None,
            ConfirmOutcome::Cancelled => Some(Intent::CloseModal),
            ConfirmOutcome::Confirmed { force, subject } => {
                Some(Intent::Confirmed { force, subject })
            }
        },
        ActiveModal::CreationForm(form) => match form.handle_key(key) {
            FormOutcome::Pending => None,
            FormOutcome::Cancelled => Some(Intent::CloseModal),
            FormOutcome::Submitted(request) => Some(Intent::CreateSubmitted(request)),
        },
        ActiveModal::ActionPicker(picker) => match picker.handle_key(key) {
            PickerOutcome::Pending => None,
            PickerOutcome::Cancelled => Some(Intent::CloseModal),
            PickerOutcome::Chosen { action, subject } => {
                Some(Intent::ActionChosen { action, subject })
            }
        },
    }
}

fn route_base_key(app: &mut App, key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Tab => Some(Intent::SwitchTab(app.tab.next())),
        KeyCode::BackTab => Some(Intent::SwitchTab(app.tab.prev())),
        KeyCode::Enter => Some(Intent::ShowActions),
        KeyCode::Char('n') => Some(Intent::NewWorktree),
        KeyCode::Char('p') => Some(Intent::Prune),
        KeyCode::Char('r') => Some(Intent::Refresh),
        _ => {
            if let Some(list) = app.active_list_mut() {
                list.handle_key(key);
            }
            None
        }
    }
}

/// Route a pointer event
///
/// A left click on the tab row selects the tab under it. Wheel events scroll the list
/// when over the list or the details pane; clicks only count inside the list.
pub fn route_mouse(app: &mut App, mouse: MouseEvent) -> Option<Intent> {
    if app.modals.is_open() {
        return None;
    }

    let layout = app.layout;
    if mouse.row == layout.tabs.y && rect_contains(layout.tabs, mouse.column, mouse.row) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            return Tab::at_column(mouse.column).map(Intent::SwitchTab);
        }
        return None;
    }

    if app.snapshot.is_not_a_repository() {
        return None;
    }

    let list = app.active_list_mut()?;
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            if rect_contains(layout.list, mouse.column, mouse.row)
                || rect_contains(layout.details, mouse.column, mouse.row)
            {
                list.handle_mouse(mouse);
            }
        }
        _ => {
            if list.contains(mouse.column, mouse.row) {
                list.handle_mouse(mouse);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_chord() {
        assert!(is_quit_chord(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_chord(&KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit_chord(&KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL
        )));
    }
}
