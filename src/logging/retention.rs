//! Removal of old log files

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use super::file_writer::{LOG_FILE_EXTENSION, LOG_FILE_PREFIX};

/// Log files older than this many days are removed
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Remove log files older than [`DEFAULT_RETENTION_DAYS`]
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    cleanup_older_than(logs_dir, Duration::from_secs(DEFAULT_RETENTION_DAYS * 24 * 60 * 60))
}

fn cleanup_older_than(logs_dir: &Path, max_age: Duration) -> Result<usize> {
    if !logs_dir.is_dir() {
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let entries = fs::read_dir(logs_dir)
        .with_context(|| format!("Failed to read logs directory {}", logs_dir.display()))?;

    let mut deleted = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_log_file_name);
        if !is_ours {
            continue;
        }

        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .is_ok_and(|modified| modified < cutoff);
        if expired && fs::remove_file(&path).is_ok() {
            tracing::debug!("Removed old log file {}", path.display());
            deleted += 1;
        }
    }

    Ok(deleted)
}

fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_log_file_name() {
        assert!(is_log_file_name("grove-2026-01-21_14-30-45.log"));
        assert!(!is_log_file_name("grove-2026-01-21_14-30-45.txt"));
        assert!(!is_log_file_name("other-2026-01-21_14-30-45.log"));
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let count = cleanup_old_logs(Path::new("/nonexistent/grove/logs")).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_and_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let recent = temp_dir.path().join("grove-2026-01-21_14-30-45.log");
        let foreign = temp_dir.path().join("notes.log");
        fs::write(&recent, "log").unwrap();
        fs::write(&foreign, "notes").unwrap();

        assert_eq!(cleanup_old_logs(temp_dir.path()).unwrap(), 0);
        assert!(recent.exists());
        assert!(foreign.exists());
    }
}
