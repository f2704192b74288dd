//! Git worktree records and operation options
//!
//! Records are produced by parsing `git worktree list` and are never mutated after a
//! refresh; a new refresh builds a new collection.

use std::path::{Path, PathBuf};

/// What a worktree has checked out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorktreeKind {
    /// A branch tip
    Branch,
    /// A specific commit (detached HEAD)
    Detached,
    /// Nothing: the bare repository entry
    Bare,
}

/// Change counts from `git status --porcelain`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Files changed in the working tree
    pub modified: usize,
    /// Files with staged changes
    pub staged: usize,
    /// Untracked files
    pub untracked: usize,
}

impl StatusSummary {
    /// Check whether there are no changes at all
    pub fn is_clean(&self) -> bool {
        self.modified == 0 && self.staged == 0 && self.untracked == 0
    }
}

/// One entry of `git worktree list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    /// Absolute path of the worktree (stable identifier)
    pub path: PathBuf,
    /// Checked-out branch, empty when detached or bare
    pub branch: String,
    /// Short commit hash, empty for bare entries
    pub commit_hash: String,
    /// Kind of checkout
    pub kind: WorktreeKind,
    /// Change counts, filled in when the list is refreshed with status
    pub status: Option<StatusSummary>,
}

impl WorktreeRecord {
    /// Create a bare entry
    pub fn bare(path: PathBuf) -> Self {
        Self {
            path,
            branch: String::new(),
            commit_hash: String::new(),
            kind: WorktreeKind::Bare,
            status: None,
        }
    }

    /// Create a detached-HEAD entry
    pub fn detached(path: PathBuf, commit_hash: String) -> Self {
        Self {
            path,
            branch: String::new(),
            commit_hash,
            kind: WorktreeKind::Detached,
            status: None,
        }
    }

    /// Check if this is the bare repository entry
    pub fn is_bare(&self) -> bool {
        self.kind == WorktreeKind::Bare
    }

    /// Check if HEAD is detached
    pub fn is_detached(&self) -> bool {
        self.kind == WorktreeKind::Detached
    }

    /// Name of the worktree (last path component)
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Short description used in list rows
    pub fn summary(&self) -> String {
        match self.kind {
            WorktreeKind::Bare => "Bare repository".to_string(),
            WorktreeKind::Detached => "Detached HEAD".to_string(),
            WorktreeKind::Branch => self.branch.clone(),
        }
    }
}

/// Options for `git worktree add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    /// Where the new worktree goes
    pub path: PathBuf,
    /// Branch to create or check out. For a new branch, defaults to the path's final segment
    pub branch: Option<String>,
    /// Create `branch` instead of checking out an existing one
    pub create_branch: bool,
    /// Revision the new branch starts from (HEAD when omitted)
    pub base: Option<String>,
}

impl AddOptions {
    /// Build the argument vector for git
    pub fn to_args(&self) -> Vec<String> {
        let path = self.path.display().to_string();
        let mut args = vec!["worktree".to_string(), "add".to_string()];

        if self.create_branch {
            let branch = self
                .branch
                .clone()
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| default_branch_for(&self.path));
            args.push("-b".to_string());
            args.push(branch);
            args.push(path);
            if let Some(base) = self.base.as_ref().filter(|b| !b.is_empty()) {
                args.push(base.clone());
            }
        } else {
            args.push(path);
            if let Some(branch) = self.branch.as_ref().filter(|b| !b.is_empty()) {
                args.push(branch.clone());
            }
        }

        args
    }
}

/// Options for `git worktree remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Worktree to remove
    pub path: PathBuf,
    /// Remove even with uncommitted changes
    pub force: bool,
}

impl RemoveOptions {
    /// Build the argument vector for git
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["worktree".to_string(), "remove".to_string()];
        if self.force {
            args.push("--force".to_string());
        }
        args.push(self.path.display().to_string());
        args
    }
}

fn default_branch_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Suggest a sibling directory for a branch checkout
///
/// `/code/app` + `feature/auth` gives `/code/app-feature-auth`. Characters that are awkward
/// in directory names are replaced with `-`.
pub fn suggested_path_for_branch(main_worktree: &Path, branch_name: &str) -> PathBuf {
    let safe_branch = branch_name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' '], "-");
    let base_name = main_worktree
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "worktree".to_string());
    let parent = main_worktree.parent().unwrap_or(main_worktree);
    parent.join(format!("{}-{}", base_name, safe_branch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name() {
        let record = WorktreeRecord::bare(PathBuf::from("/code/repo.git"));
        assert_eq!(record.name(), "repo.git");
        assert!(record.is_bare());
        assert!(!record.is_detached());
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            WorktreeRecord::detached(PathBuf::from("/x"), "abc".into()).summary(),
            "Detached HEAD"
        );
        assert_eq!(WorktreeRecord::bare(PathBuf::from("/x")).summary(), "Bare repository");
    }

    #[test]
    fn test_add_args_new_branch() {
        let opts = AddOptions {
            path: PathBuf::from("/code/app-feature"),
            branch: Some("feature".to_string()),
            create_branch: true,
            base: Some("origin/main".to_string()),
        };
        assert_eq!(
            opts.to_args(),
            vec!["worktree", "add", "-b", "feature", "/code/app-feature", "origin/main"]
        );
    }

    #[test]
    fn test_add_args_new_branch_derived_from_path() {
        let opts = AddOptions {
            path: PathBuf::from("/code/hotfix"),
            branch: None,
            create_branch: true,
            base: None,
        };
        assert_eq!(opts.to_args(), vec!["worktree", "add", "-b", "hotfix", "/code/hotfix"]);
    }

    #[test]
    fn test_add_args_existing_branch() {
        let opts = AddOptions {
            path: PathBuf::from("/code/app-release"),
            branch: Some("release".to_string()),
            create_branch: false,
            base: None,
        };
        assert_eq!(
            opts.to_args(),
            vec!["worktree", "add", "/code/app-release", "release"]
        );
    }

    #[test]
    fn test_remove_args() {
        let plain = RemoveOptions {
            path: PathBuf::from("/code/app-x"),
            force: false,
        };
        assert_eq!(plain.to_args(), vec!["worktree", "remove", "/code/app-x"]);

        let forced = RemoveOptions {
            force: true,
            ..plain
        };
        assert_eq!(
            forced.to_args(),
            vec!["worktree", "remove", "--force", "/code/app-x"]
        );
    }

    #[test]
    fn test_suggested_path_for_branch() {
        assert_eq!(
            suggested_path_for_branch(Path::new("/code/app"), "feature/add-auth"),
            PathBuf::from("/code/app-feature-add-auth")
        );
        assert_eq!(
            suggested_path_for_branch(Path::new("/code/app"), "fix/bug:123"),
            PathBuf::from("/code/app-fix-bug-123")
        );
    }
}
