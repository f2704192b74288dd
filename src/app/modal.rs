//! Which modal, if any, owns input focus
//!
//! At most one modal is live at a time. Kinds are ordered by how consequential they are:
//! a confirmation outranks the creation form, which outranks the action picker. A modal
//! can only be replaced by one of equal or higher rank.

use ratatui::prelude::*;

use crate::tui::action_picker::ActionPicker;
use crate::tui::confirm::ConfirmDialog;
use crate::tui::create_form::CreateForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModalKind {
    ActionPicker,
    CreationForm,
    ConfirmDialog,
}

#[derive(Debug, Clone)]
pub enum ActiveModal {
    ActionPicker(ActionPicker),
    CreationForm(CreateForm),
    ConfirmDialog(ConfirmDialog),
}

impl ActiveModal {
    pub fn kind(&self) -> ModalKind {
        match self {
            ActiveModal::ActionPicker(_) => ModalKind::ActionPicker,
            ActiveModal::CreationForm(_) => ModalKind::CreationForm,
            ActiveModal::ConfirmDialog(_) => ModalKind::ConfirmDialog,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            ActiveModal::ActionPicker(picker) => picker.render(frame, area),
            ActiveModal::CreationForm(form) => form.render(frame, area),
            ActiveModal::ConfirmDialog(dialog) => dialog.render(frame, area),
        }
    }
}

impl From<ActionPicker> for ActiveModal {
    fn from(picker: ActionPicker) -> Self {
        ActiveModal::ActionPicker(picker)
    }
}

impl From<CreateForm> for ActiveModal {
    fn from(form: CreateForm) -> Self {
        ActiveModal::CreationForm(form)
    }
}

impl From<ConfirmDialog> for ActiveModal {
    fn from(dialog: ConfirmDialog) -> Self {
        ActiveModal::ConfirmDialog(dialog)
    }
}

/// Holder of the single live modal
#[derive(Debug, Default)]
pub struct ModalSlot {
    active: Option<ActiveModal>,
}

impl ModalSlot {
    /// Show `modal`; refused (returns false) while a higher-ranked modal is open
    pub fn open(&mut self, modal: impl Into<ActiveModal>) -> bool {
        let modal = modal.into();
        if let Some(current) = &self.active {
            if current.kind() > modal.kind() {
                tracing::debug!(
                    current = ?current.kind(),
                    requested = ?modal.kind(),
                    "Modal refused by a higher-priority modal"
                );
                return false;
            }
        }
        self.active = Some(modal);
        true
    }

    /// Drop the live modal and all of its state
    pub fn close(&mut self) -> Option<ActiveModal> {
        self.active.take()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.active.as_ref().map(ActiveModal::kind)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveModal> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveModal> {
        self.active.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::action_picker::worktree_actions;
    use crate::tui::confirm::ConfirmSubject;
    use crate::tui::item::ViewItem;

    fn picker() -> ActionPicker {
        ActionPicker::new(ViewItem::from_branch("main"), worktree_actions())
    }

    #[test]
    fn test_precedence_order() {
        assert!(ModalKind::ConfirmDialog > ModalKind::CreationForm);
        assert!(ModalKind::CreationForm > ModalKind::ActionPicker);
    }

    #[test]
    fn test_higher_replaces_lower() {
        let mut slot = ModalSlot::default();
        assert!(slot.open(picker()));
        assert!(slot.open(ConfirmDialog::prune(None)));
        assert_eq!(slot.kind(), Some(ModalKind::ConfirmDialog));
    }

    #[test]
    fn test_lower_cannot_replace_higher() {
        let mut slot = ModalSlot::default();
        slot.open(ConfirmDialog::new("t", "m", ConfirmSubject::Prune));
        assert!(!slot.open(CreateForm::new()));
        assert!(!slot.open(picker()));
        assert_eq!(slot.kind(), Some(ModalKind::ConfirmDialog));
    }

    #[test]
    fn test_close_drops_state() {
        let mut slot = ModalSlot::default();
        slot.open(CreateForm::new());
        assert!(slot.is_open());
        assert!(matches!(slot.close(), Some(ActiveModal::CreationForm(_))));
        assert!(!slot.is_open());
        assert!(slot.close().is_none());
    }
}
