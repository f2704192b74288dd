//! Git operations wrapper module
//!
//! Every operation shells out to the `git` executable and re-derives its result from
//! git's text output. Process spawning sits behind [`CommandRunner`] so the rest of the
//! application can be driven by a scripted runner in tests.

pub mod error;
pub mod parse;
pub mod terminal;
pub mod worktree;

pub use error::{GitError, OperationKind};
pub use worktree::{AddOptions, RemoveOptions, StatusSummary, WorktreeKind, WorktreeRecord};

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Combined output of one external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// stdout followed by stderr
    pub text: String,
}

/// Runs the external repository tool
pub trait CommandRunner {
    /// Run the tool in `dir` with `args`, returning its combined output
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&self, dir: &Path, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runner that invokes the system `git` binary
#[derive(Debug, Clone, Default)]
pub struct GitCli;

impl CommandRunner for GitCli {
    fn run(&self, dir: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new("git").args(args).current_dir(dir).output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let success = output.status.success();
        if !success && text.trim().is_empty() {
            text = format!("git exited with {}", output.status);
        }

        Ok(CommandOutput { success, text })
    }
}

/// Check if `path` is inside a git repository
///
/// Looks for a `.git` entry (directory, or file for linked worktrees) in `path` or any
/// ancestor, or for the layout of a bare repository. git itself is not invoked.
pub fn is_git_repository(path: &Path) -> bool {
    path.ancestors().any(|dir| {
        dir.join(".git").exists()
            || (dir.join("HEAD").is_file() && dir.join("objects").is_dir() && dir.join("refs").is_dir())
    })
}

/// Adapter over the repository containing `dir`
pub struct GitRepo {
    dir: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl GitRepo {
    /// Adapter that runs the system git in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_runner(dir, GitCli)
    }

    /// Adapter with a custom runner
    pub fn with_runner(dir: impl Into<PathBuf>, runner: impl CommandRunner + 'static) -> Self {
        Self {
            dir: dir.into(),
            runner: Box::new(runner),
        }
    }

    /// Directory the repository was opened from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run git in `dir`, mapping failure with `on_failure`
    ///
    /// Fails fast with [`GitError::NotARepository`] before spawning anything when `dir`
    /// is not inside a repository.
    fn invoke(
        &self,
        dir: &Path,
        args: &[String],
        on_failure: impl FnOnce(String) -> GitError,
    ) -> Result<String, GitError> {
        if !is_git_repository(dir) {
            return Err(GitError::NotARepository {
                path: dir.to_path_buf(),
            });
        }

        tracing::debug!(dir = %dir.display(), ?args, "Running git");

        match self.runner.run(dir, args) {
            Ok(output) if output.success => Ok(output.text),
            Ok(output) => {
                let reason = output.text.trim().to_string();
                tracing::debug!(?args, %reason, "git exited unsuccessfully");
                Err(on_failure(reason))
            }
            Err(e) => {
                tracing::warn!(?args, "Failed to spawn git: {}", e);
                Err(on_failure(e.to_string()))
            }
        }
    }

    fn failed(kind: OperationKind, target: &Path) -> impl FnOnce(String) -> GitError {
        let target = target.display().to_string();
        move |reason| GitError::OperationFailed {
            kind,
            target,
            reason,
        }
    }

    /// List all worktrees (without status)
    pub fn list_worktrees(&self) -> Result<Vec<WorktreeRecord>, GitError> {
        let args = to_args(&["worktree", "list"]);
        let output = self.invoke(
            &self.dir,
            &args,
            Self::failed(OperationKind::List, &self.dir),
        )?;
        Ok(parse::parse_worktree_list(&output))
    }

    /// List all worktrees and fill in the change counts of each non-bare one
    ///
    /// A worktree whose status cannot be read is still listed, without counts.
    pub fn list_worktrees_with_status(&self) -> Result<Vec<WorktreeRecord>, GitError> {
        let mut worktrees = self.list_worktrees()?;
        for worktree in worktrees.iter_mut().filter(|w| !w.is_bare()) {
            match self.status(&worktree.path) {
                Ok(summary) => worktree.status = Some(summary),
                Err(e) => tracing::warn!("Skipping status of {}: {}", worktree.path.display(), e),
            }
        }
        Ok(worktrees)
    }

    /// Create a worktree
    pub fn add_worktree(&self, opts: &AddOptions) -> Result<(), GitError> {
        self.invoke(
            &self.dir,
            &opts.to_args(),
            Self::failed(OperationKind::Add, &opts.path),
        )?;
        tracing::info!("Added worktree at {}", opts.path.display());
        Ok(())
    }

    /// Remove a worktree
    pub fn remove_worktree(&self, opts: &RemoveOptions) -> Result<(), GitError> {
        self.invoke(
            &self.dir,
            &opts.to_args(),
            Self::failed(OperationKind::Remove, &opts.path),
        )?;
        tracing::info!(force = opts.force, "Removed worktree {}", opts.path.display());
        Ok(())
    }

    /// Prune administrative entries of worktrees whose directories are gone
    ///
    /// Returns git's report, trimmed.
    pub fn prune(&self) -> Result<String, GitError> {
        let args = to_args(&["worktree", "prune", "--verbose"]);
        let output = self.invoke(&self.dir, &args, |reason| GitError::PruneFailed { reason })?;
        tracing::info!("Pruned stale worktrees");
        Ok(output.trim().to_string())
    }

    /// Report what [`prune`](Self::prune) would remove, without removing anything
    pub fn prune_dry_run(&self) -> Result<String, GitError> {
        let args = to_args(&["worktree", "prune", "--dry-run", "--verbose"]);
        let output = self.invoke(&self.dir, &args, |reason| GitError::PruneFailed { reason })?;
        Ok(output.trim().to_string())
    }

    /// Read change counts of the worktree at `worktree_path`
    pub fn status(&self, worktree_path: &Path) -> Result<StatusSummary, GitError> {
        let args = to_args(&["status", "--porcelain"]);
        let output = self.invoke(
            worktree_path,
            &args,
            Self::failed(OperationKind::Status, worktree_path),
        )?;
        Ok(parse::parse_status(&output))
    }

    /// List local branch names
    pub fn list_branches(&self) -> Result<Vec<String>, GitError> {
        let args = to_args(&["branch", "--format=%(refname:short)"]);
        let output = self.invoke(
            &self.dir,
            &args,
            Self::failed(OperationKind::Branches, &self.dir),
        )?;
        Ok(parse::parse_branch_list(&output))
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Scripted stand-in for git used by unit tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeState {
        /// (path, `git worktree list` line)
        worktrees: Vec<(String, String)>,
        branches: Vec<String>,
        status: String,
        prune_report: String,
        /// subcommand ("add", "remove", "prune", "list") -> failure text
        failures: HashMap<String, String>,
        calls: Vec<Vec<String>>,
    }

    /// In-memory repository that answers like `git` would
    #[derive(Clone, Default)]
    pub(crate) struct FakeGit {
        state: Rc<RefCell<FakeState>>,
    }

    impl FakeGit {
        pub(crate) fn with_worktrees(paths_and_branches: &[(&str, &str)]) -> Self {
            let fake = Self::default();
            for (path, branch) in paths_and_branches {
                fake.push_worktree(path, branch);
            }
            fake
        }

        pub(crate) fn push_worktree(&self, path: &str, branch: &str) {
            let line = format!("{}  abc1234 [{}]", path, branch);
            self.state
                .borrow_mut()
                .worktrees
                .push((path.to_string(), line));
        }

        pub(crate) fn set_branches(&self, branches: &[&str]) {
            self.state.borrow_mut().branches = branches.iter().map(|b| b.to_string()).collect();
        }

        pub(crate) fn set_status(&self, status: &str) {
            self.state.borrow_mut().status = status.to_string();
        }

        pub(crate) fn set_prune_report(&self, report: &str) {
            self.state.borrow_mut().prune_report = report.to_string();
        }

        pub(crate) fn fail(&self, subcommand: &str, message: &str) {
            self.state
                .borrow_mut()
                .failures
                .insert(subcommand.to_string(), message.to_string());
        }

        pub(crate) fn calls(&self) -> Vec<Vec<String>> {
            self.state.borrow().calls.clone()
        }

        /// Calls whose argument vector starts with `prefix`
        pub(crate) fn calls_starting_with(&self, prefix: &[&str]) -> Vec<Vec<String>> {
            self.calls()
                .into_iter()
                .filter(|call| {
                    call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
                })
                .collect()
        }

        pub(crate) fn clear_calls(&self) {
            self.state.borrow_mut().calls.clear();
        }
    }

    impl CommandRunner for FakeGit {
        fn run(&self, _dir: &Path, args: &[String]) -> io::Result<CommandOutput> {
            let mut state = self.state.borrow_mut();
            state.calls.push(args.to_vec());

            let subcommand = match args.first().map(String::as_str) {
                Some("worktree") => args.get(1).cloned().unwrap_or_default(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            if let Some(message) = state.failures.get(&subcommand) {
                return Ok(CommandOutput {
                    success: false,
                    text: message.clone(),
                });
            }

            let text = match subcommand.as_str() {
                "list" => state
                    .worktrees
                    .iter()
                    .map(|(_, line)| format!("{}\n", line))
                    .collect(),
                "remove" => {
                    let target = args.last().cloned().unwrap_or_default();
                    state.worktrees.retain(|(path, _)| *path != target);
                    String::new()
                }
                "add" => {
                    let (branch, path) = if args.get(2).map(String::as_str) == Some("-b") {
                        (args[3].clone(), args[4].clone())
                    } else {
                        (args.get(3).cloned().unwrap_or_default(), args[2].clone())
                    };
                    let line = format!("{}  def5678 [{}]", path, branch);
                    state.worktrees.push((path, line));
                    String::new()
                }
                "prune" => state.prune_report.clone(),
                "status" => state.status.clone(),
                "branch" => state.branches.iter().map(|b| format!("{}\n", b)).collect(),
                _ => String::new(),
            };

            Ok(CommandOutput {
                success: true,
                text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeGit;
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(".git")).unwrap();
        temp_dir
    }

    #[test]
    fn test_is_git_repository() {
        let repo = create_test_repo();
        assert!(is_git_repository(repo.path()));
        assert!(is_git_repository(&repo.path().join("nested/dir")));

        let plain = TempDir::new().unwrap();
        assert!(!is_git_repository(plain.path()));
    }

    #[test]
    fn test_is_git_repository_bare_layout() {
        let bare = TempDir::new().unwrap();
        std::fs::write(bare.path().join("HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::create_dir(bare.path().join("objects")).unwrap();
        std::fs::create_dir(bare.path().join("refs")).unwrap();
        assert!(is_git_repository(bare.path()));
    }

    #[test]
    fn test_not_a_repository_fails_without_spawning() {
        let plain = TempDir::new().unwrap();
        let fake = FakeGit::default();
        let repo = GitRepo::with_runner(plain.path(), fake.clone());

        let err = repo.list_worktrees().unwrap_err();
        assert_eq!(
            err,
            GitError::NotARepository {
                path: plain.path().to_path_buf()
            }
        );
        assert!(repo.prune().unwrap_err().is_not_a_repository());
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_list_worktrees_with_status() {
        let dir = create_test_repo();
        let main = dir.path().join("main");
        let fake = FakeGit::with_worktrees(&[(main.to_str().unwrap(), "main")]);
        fake.set_status(" M a.txt\n?? b.txt\n");
        let repo = GitRepo::with_runner(dir.path(), fake.clone());

        let worktrees = repo.list_worktrees_with_status().unwrap();
        assert_eq!(worktrees.len(), 1);
        assert_eq!(worktrees[0].branch, "main");
        assert_eq!(
            worktrees[0].status,
            Some(StatusSummary {
                modified: 1,
                staged: 0,
                untracked: 1
            })
        );
        assert_eq!(fake.calls_starting_with(&["status", "--porcelain"]).len(), 1);
    }

    #[test]
    fn test_remove_failure_carries_trimmed_output() {
        let dir = create_test_repo();
        let fake = FakeGit::default();
        fake.fail("remove", "  fatal: contains modified files\n");
        let repo = GitRepo::with_runner(dir.path(), fake);

        let err = repo
            .remove_worktree(&RemoveOptions {
                path: PathBuf::from("/repo/wt"),
                force: false,
            })
            .unwrap_err();
        assert_eq!(
            err,
            GitError::OperationFailed {
                kind: OperationKind::Remove,
                target: "/repo/wt".to_string(),
                reason: "fatal: contains modified files".to_string(),
            }
        );
    }

    #[test]
    fn test_prune_failure_is_prune_failed() {
        let dir = create_test_repo();
        let fake = FakeGit::default();
        fake.fail("prune", "fatal: locked");
        let repo = GitRepo::with_runner(dir.path(), fake);

        assert_eq!(
            repo.prune().unwrap_err(),
            GitError::PruneFailed {
                reason: "fatal: locked".to_string()
            }
        );
    }

    #[test]
    fn test_prune_output_is_trimmed() {
        let dir = create_test_repo();
        let fake = FakeGit::default();
        fake.set_prune_report("Removing worktrees/old: gitdir file points to non-existent location\n");
        let repo = GitRepo::with_runner(dir.path(), fake.clone());

        assert_eq!(
            repo.prune_dry_run().unwrap(),
            "Removing worktrees/old: gitdir file points to non-existent location"
        );
        assert_eq!(
            fake.calls(),
            vec![vec!["worktree", "prune", "--dry-run", "--verbose"]]
        );
    }

    #[test]
    fn test_list_branches() {
        let dir = create_test_repo();
        let fake = FakeGit::default();
        fake.set_branches(&["main", "feature/x"]);
        let repo = GitRepo::with_runner(dir.path(), fake);

        assert_eq!(repo.list_branches().unwrap(), vec!["main", "feature/x"]);
    }

    #[test]
    fn test_spawn_failure_reported_as_operation_failure() {
        struct Unspawnable;
        impl CommandRunner for Unspawnable {
            fn run(&self, _dir: &Path, _args: &[String]) -> io::Result<CommandOutput> {
                Err(io::Error::new(io::ErrorKind::NotFound, "git not found"))
            }
        }

        let dir = create_test_repo();
        let repo = GitRepo::with_runner(dir.path(), Unspawnable);
        match repo.list_worktrees().unwrap_err() {
            GitError::OperationFailed { kind, reason, .. } => {
                assert_eq!(kind, OperationKind::List);
                assert_eq!(reason, "git not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
