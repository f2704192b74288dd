//! Typed errors for git operations

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which repository operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// `git worktree list`
    List,
    /// `git worktree add`
    Add,
    /// `git worktree remove`
    Remove,
    /// `git status --porcelain`
    Status,
    /// `git branch`
    Branches,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            OperationKind::List => "list worktrees of",
            OperationKind::Add => "add worktree",
            OperationKind::Remove => "remove worktree",
            OperationKind::Status => "read status of",
            OperationKind::Branches => "list branches of",
        };
        f.write_str(verb)
    }
}

/// Errors returned by the git adapter
///
/// The adapter never panics; every failure of the external tool ends up here and is
/// turned into user-visible feedback by the application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitError {
    /// The working directory is not inside a git repository
    #[error("not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    /// git exited unsuccessfully (or could not be spawned)
    #[error("could not {kind} '{target}': {reason}")]
    OperationFailed {
        kind: OperationKind,
        target: String,
        reason: String,
    },

    /// `git worktree prune` exited unsuccessfully
    #[error("could not prune worktrees: {reason}")]
    PruneFailed { reason: String },
}

impl GitError {
    /// Check whether this is the "not a repository" error
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, GitError::NotARepository { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_repository_display() {
        let err = GitError::NotARepository {
            path: PathBuf::from("/tmp/nowhere"),
        };
        assert_eq!(err.to_string(), "not a git repository: /tmp/nowhere");
        assert!(err.is_not_a_repository());
    }

    #[test]
    fn test_operation_failed_display() {
        let err = GitError::OperationFailed {
            kind: OperationKind::Remove,
            target: "/repo/feature".to_string(),
            reason: "contains modified files".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not remove worktree '/repo/feature': contains modified files"
        );
        assert!(!err.is_not_a_repository());
    }
}
