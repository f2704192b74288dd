//! Domain snapshot: everything the last refresh learned from git

use crate::git::{GitError, GitRepo, WorktreeRecord};
use crate::tui::item::ViewItem;

/// Worktrees and branches as of one refresh
///
/// Never mutated after loading; a refresh builds a new snapshot.
#[derive(Debug, Default)]
pub struct Snapshot {
    worktrees: Vec<WorktreeRecord>,
    branches: Vec<String>,
    load_error: Option<GitError>,
}

impl Snapshot {
    /// Load worktrees (with status) and local branches
    ///
    /// A failed worktree listing yields an empty snapshot carrying the error. Branch
    /// listing failures only leave the branch list empty.
    pub fn load(repo: &GitRepo) -> Self {
        let worktrees = match repo.list_worktrees_with_status() {
            Ok(worktrees) => worktrees,
            Err(e) => {
                tracing::warn!("Failed to list worktrees: {}", e);
                return Self {
                    load_error: Some(e),
                    ..Self::default()
                };
            }
        };

        let branches = repo.list_branches().unwrap_or_else(|e| {
            tracing::warn!("Failed to list branches: {}", e);
            Vec::new()
        });

        tracing::debug!(
            worktrees = worktrees.len(),
            branches = branches.len(),
            "Loaded snapshot"
        );

        Self {
            worktrees,
            branches,
            load_error: None,
        }
    }

    pub fn worktrees(&self) -> &[WorktreeRecord] {
        &self.worktrees
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn load_error(&self) -> Option<&GitError> {
        self.load_error.as_ref()
    }

    pub fn is_not_a_repository(&self) -> bool {
        self.load_error
            .as_ref()
            .is_some_and(GitError::is_not_a_repository)
    }

    /// The first listed worktree, which git always reports as the main one
    pub fn main_worktree(&self) -> Option<&WorktreeRecord> {
        self.worktrees.first()
    }

    pub fn worktree_items(&self) -> Vec<ViewItem> {
        self.worktrees
            .iter()
            .cloned()
            .map(ViewItem::from_worktree)
            .collect()
    }

    pub fn branch_items(&self) -> Vec<ViewItem> {
        self.branches
            .iter()
            .map(|b| ViewItem::from_branch(b))
            .collect()
    }
}
