//! Display-oriented projection of domain records

use crate::git::WorktreeRecord;

/// What the details pane shows for an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetail {
    /// Full worktree record
    Worktree(WorktreeRecord),
    /// Free-form description text
    Text(String),
}

/// One row of the list surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    /// Stable key (the worktree path, or the branch name)
    pub id: String,
    pub title: String,
    pub description: String,
    pub detail: ItemDetail,
}

impl ViewItem {
    /// Project a worktree record
    pub fn from_worktree(record: WorktreeRecord) -> Self {
        Self {
            id: record.path.display().to_string(),
            title: record.name(),
            description: record.summary(),
            detail: ItemDetail::Worktree(record),
        }
    }

    /// Project a local branch name
    pub fn from_branch(name: &str) -> Self {
        Self {
            id: name.to_string(),
            title: name.to_string(),
            description: "Local branch".to_string(),
            detail: ItemDetail::Text(format!(
                "Local branch '{}'. Press Enter to check it out in a new worktree.",
                name
            )),
        }
    }

    /// The worktree behind this item, if it is one
    pub fn worktree(&self) -> Option<&WorktreeRecord> {
        match &self.detail {
            ItemDetail::Worktree(record) => Some(record),
            ItemDetail::Text(_) => None,
        }
    }
}
