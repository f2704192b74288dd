//! Logging for Grove
//!
//! The TUI owns stdout, so everything goes to a timestamped file under the config
//! directory. Old files are removed at startup.

mod file_writer;
mod retention;

pub use file_writer::{init_file_logging, LogFileInfo, LoggingGuard};
pub use retention::cleanup_old_logs;
