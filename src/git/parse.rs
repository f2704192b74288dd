//! Parsers for git's line-oriented output
//!
//! Both parsers are total: lines they do not understand are skipped, never reported.

use std::path::PathBuf;

use super::worktree::{StatusSummary, WorktreeKind, WorktreeRecord};

const BARE_SUFFIX: &str = "(bare)";
const DETACHED_SUFFIX: &str = "(detached HEAD)";

/// Parse the output of `git worktree list`
///
/// Recognised line shapes:
///
/// ```text
/// /path/to/main      abc1234 [main]
/// /path/to/repo.git  (bare)
/// /path/to/detached  abc1234 (detached HEAD)
/// ```
pub fn parse_worktree_list(output: &str) -> Vec<WorktreeRecord> {
    output.lines().filter_map(parse_worktree_line).collect()
}

fn parse_worktree_line(line: &str) -> Option<WorktreeRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_suffix(BARE_SUFFIX) {
        let path = rest.trim();
        return (!path.is_empty()).then(|| WorktreeRecord::bare(PathBuf::from(path)));
    }

    if let Some(rest) = line.strip_suffix(DETACHED_SUFFIX) {
        let (path, hash) = split_path_hash(rest);
        return (!path.is_empty())
            .then(|| WorktreeRecord::detached(PathBuf::from(path), hash.to_string()));
    }

    let open = line.rfind('[')?;
    let close = line.rfind(']')?;
    if close <= open {
        return None;
    }
    let branch = &line[open + 1..close];
    let (path, hash) = split_path_hash(&line[..open]);
    if path.is_empty() {
        return None;
    }

    Some(WorktreeRecord {
        path: PathBuf::from(path),
        branch: branch.to_string(),
        commit_hash: hash.to_string(),
        kind: WorktreeKind::Branch,
        status: None,
    })
}

/// Split `"<path>  <hash>"` at the last run of two or more spaces
///
/// git pads the path column, so a wide gap separates path from hash while single
/// spaces may appear inside the path. Without such a gap the whole string is the path.
pub fn split_path_hash(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.as_bytes().windows(2).rposition(|pair| pair == b"  ") {
        Some(idx) => (s[..idx].trim(), s[idx..].trim()),
        None => (s, ""),
    }
}

/// Parse the output of `git status --porcelain` into change counts
///
/// A file both staged and modified in the worktree (`MM`) counts once in each bucket.
pub fn parse_status(output: &str) -> StatusSummary {
    let mut summary = StatusSummary::default();

    for line in output.lines() {
        let mut chars = line.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            continue;
        };

        if index == '?' && worktree == '?' {
            summary.untracked += 1;
            continue;
        }
        if index != ' ' && index != '?' {
            summary.staged += 1;
        }
        if worktree != ' ' && worktree != '?' {
            summary.modified += 1;
        }
    }

    summary
}

/// Parse `git branch --format=%(refname:short)` output, one branch per line
pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
