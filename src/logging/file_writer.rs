//! File-based logging with tracing integration

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) const LOG_FILE_PREFIX: &str = "grove-";
pub(crate) const LOG_FILE_EXTENSION: &str = ".log";

/// Information about the current log file
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: PathBuf,
}

/// Generate a timestamped log file path
pub fn create_log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("{}{}{}", LOG_FILE_PREFIX, timestamp, LOG_FILE_EXTENSION))
}

/// Writer handed to the fmt layer; every event is flushed immediately
struct FileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.lock() {
            Ok(mut file) => {
                file.write_all(buf)?;
                file.flush()?;
                Ok(buf.len())
            }
            // A poisoned lock only means another thread panicked mid-write; drop the line
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}

struct FileWriterMaker {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for FileWriterMaker {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Guard that keeps the log file open
pub struct LoggingGuard {
    _file: Arc<Mutex<File>>,
}

/// Initialize file logging
///
/// The filter comes from `RUST_LOG`, defaulting to `grove=info`. Returns the log file
/// info and a guard that must be kept alive for the duration of logging.
pub fn init_file_logging(logs_dir: &Path) -> Result<(LogFileInfo, LoggingGuard)> {
    fs::create_dir_all(logs_dir).context("Failed to create logs directory")?;

    let log_path = create_log_file_path(logs_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    let file = Arc::new(Mutex::new(file));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(FileWriterMaker {
            file: Arc::clone(&file),
        })
        .with_ansi(false)
        .with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grove=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok((LogFileInfo { path: log_path }, LoggingGuard { _file: file }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_file_path() {
        let path = create_log_file_path(Path::new("/tmp/grove/logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("grove-"));
        assert!(name.ends_with(".log"));
        // grove- + YYYY-MM-DD_HH-MM-SS + .log
        assert_eq!(name.len(), "grove-".len() + 19 + ".log".len());
        assert!(path.starts_with("/tmp/grove/logs"));
    }

    #[test]
    fn test_file_writer_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("grove-test.log");
        let file = File::create(&path).unwrap();
        let maker = FileWriterMaker {
            file: Arc::new(Mutex::new(file)),
        };

        maker.make_writer().write_all(b"first\n").unwrap();
        maker.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
