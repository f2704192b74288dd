//! What surfaces ask the engine to do, and how the engine does it
//!
//! Surfaces never talk to git. They resolve to an [`Intent`] and the engine carries it
//! out here, turning every outcome into feedback.

use std::path::PathBuf;

use super::App;
use crate::config::OnCreate;
use crate::git::terminal::cd_command;
use crate::git::worktree::suggested_path_for_branch;
use crate::git::{AddOptions, RemoveOptions};
use crate::tui::action_picker::{branch_actions, worktree_actions, ActionId, ActionPicker};
use crate::tui::confirm::{ConfirmDialog, ConfirmSubject};
use crate::tui::create_form::{CreateForm, CreateRequest};
use crate::tui::feedback::FeedbackKind;
use crate::tui::item::ViewItem;
use crate::tui::tabs::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Refresh,
    SwitchTab(Tab),
    /// Open the action picker for the selected item
    ShowActions,
    /// Open an empty creation form
    NewWorktree,
    /// Ask for confirmation to prune
    Prune,
    /// Dismiss the live modal
    CloseModal,
    ActionChosen { action: ActionId, subject: ViewItem },
    Confirmed { force: bool, subject: ConfirmSubject },
    CreateSubmitted(CreateRequest),
}

impl App {
    pub(crate) fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => {
                tracing::debug!("Quit requested");
                self.quitting = true;
            }
            Intent::Refresh => self.refresh(),
            Intent::SwitchTab(tab) => self.tab = tab,
            Intent::ShowActions => self.show_actions(),
            Intent::NewWorktree => {
                if self.can_mutate() {
                    self.modals.open(CreateForm::new());
                }
            }
            Intent::Prune => {
                if self.can_mutate() {
                    self.confirm_prune();
                }
            }
            Intent::CloseModal => {
                self.modals.close();
            }
            Intent::ActionChosen { action, subject } => {
                self.modals.close();
                self.run_action(action, subject);
            }
            Intent::Confirmed { force, subject } => {
                self.modals.close();
                match subject {
                    ConfirmSubject::DeleteWorktree(item) => self.remove_worktree(item, force),
                    ConfirmSubject::Prune => self.prune(),
                }
            }
            Intent::CreateSubmitted(request) => {
                self.modals.close();
                self.create_worktree(request);
            }
        }
    }

    /// Mutations are offered on the worktrees tab of a loaded repository only
    fn can_mutate(&self) -> bool {
        self.tab == Tab::Worktrees && !self.snapshot.is_not_a_repository()
    }

    fn show_actions(&mut self) {
        let actions = match self.tab {
            Tab::Worktrees => worktree_actions(),
            Tab::Branches => branch_actions(),
            Tab::Settings => return,
        };
        if let Some(item) = self.selected_item().cloned() {
            self.modals.open(ActionPicker::new(item, actions));
        }
    }

    fn confirm_prune(&mut self) {
        let preview = match self.repo.prune_dry_run() {
            Ok(preview) => Some(preview),
            Err(e) => {
                tracing::warn!("Prune dry run failed: {}", e);
                None
            }
        };
        self.modals.open(ConfirmDialog::prune(preview.as_deref()));
    }

    fn run_action(&mut self, action: ActionId, subject: ViewItem) {
        match action {
            ActionId::Open => self.open_worktree(&subject),
            ActionId::CopyPath => {
                let command = cd_command(&worktree_path(&subject));
                self.notify(FeedbackKind::Info, format!("Copy: {}", command));
            }
            ActionId::Delete => {
                self.modals.open(ConfirmDialog::delete_worktree(subject));
            }
            ActionId::NewWorktree => self.open_branch_form(&subject),
        }
    }

    fn open_worktree(&mut self, subject: &ViewItem) {
        match self.launcher.open(&worktree_path(subject)) {
            Ok(outcome) if outcome.success => self.notify(FeedbackKind::Success, outcome.message),
            Ok(outcome) => self.notify(FeedbackKind::Info, outcome.message),
            Err(e) => self.notify(FeedbackKind::Error, format!("Failed to open worktree: {}", e)),
        }
    }

    /// Creation form for checking out an existing branch next to the main worktree
    fn open_branch_form(&mut self, branch: &ViewItem) {
        let main = self
            .snapshot
            .main_worktree()
            .map(|w| w.path.clone())
            .unwrap_or_else(|| self.repo.dir().to_path_buf());
        let path = suggested_path_for_branch(&main, &branch.id);
        self.modals.open(CreateForm::prefilled(
            &branch.id,
            &path.display().to_string(),
            false,
        ));
    }

    fn remove_worktree(&mut self, item: ViewItem, force: bool) {
        let opts = RemoveOptions {
            path: worktree_path(&item),
            force,
        };
        match self.repo.remove_worktree(&opts) {
            Ok(()) => {
                self.refresh();
                self.notify(
                    FeedbackKind::Success,
                    format!("Removed worktree: {}", item.title),
                );
            }
            Err(e) => self.notify(
                FeedbackKind::Error,
                format!("Failed to remove worktree: {}", e),
            ),
        }
    }

    fn prune(&mut self) {
        match self.repo.prune() {
            Ok(report) => {
                self.refresh();
                let message = if report.is_empty() {
                    "Pruned stale worktrees".to_string()
                } else {
                    format!("Pruned: {}", report)
                };
                self.notify(FeedbackKind::Success, message);
            }
            Err(e) => self.notify(
                FeedbackKind::Error,
                format!("Failed to prune worktrees: {}", e),
            ),
        }
    }

    fn create_worktree(&mut self, request: CreateRequest) {
        let path = self.resolve_path(&request.path);
        let opts = AddOptions {
            path: path.clone(),
            branch: Some(request.branch),
            create_branch: request.create_branch,
            base: None,
        };

        if let Err(e) = self.repo.add_worktree(&opts) {
            self.notify(
                FeedbackKind::Error,
                format!("Failed to create worktree: {}", e),
            );
            return;
        }

        match self.config.on_create {
            OnCreate::Refresh => {
                self.refresh();
                self.notify(
                    FeedbackKind::Success,
                    format!("Created worktree at {}", path.display()),
                );
            }
            OnCreate::Switch => {
                tracing::info!("Handing off to {}", path.display());
                self.handoff = Some(path);
                self.quitting = true;
            }
        }
    }

    /// Expand `~` and anchor relative paths at the repository directory
    fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
        if expanded.is_relative() {
            self.repo.dir().join(expanded)
        } else {
            expanded
        }
    }
}

fn worktree_path(item: &ViewItem) -> PathBuf {
    item.worktree()
        .map(|w| w.path.clone())
        .unwrap_or_else(|| PathBuf::from(&item.id))
}
