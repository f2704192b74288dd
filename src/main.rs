use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use grove::app::{self, App};
use grove::config::{self, Config};
use grove::git::GitRepo;
use grove::logging;
use grove::tui::theme::{init_theme, Theme};
use grove::tui::Tui;

/// Exit status telling the shell wrapper to `cd` into the printed path
const HANDOFF_EXIT_CODE: u8 = 2;

/// Terminal UI for git worktrees
#[derive(Debug, Parser)]
#[command(name = "grove", version, about)]
struct Cli {
    /// Repository directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Write a commented sample configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::config_file_path().context("Could not determine config directory")?;
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        config::write_sample_config(&path)?;
        println!("Wrote sample configuration to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Initialize file logging BEFORE any tracing calls
    let logs_dir = config::logs_dir();
    let (log_file_info, _guard) = logging::init_file_logging(&logs_dir)?;

    // Clean up old logs (7-day retention)
    if let Ok(count) = logging::cleanup_old_logs(&logs_dir) {
        if count > 0 {
            tracing::info!("Cleaned up {} old log files", count);
        }
    }
    tracing::info!("Logging to: {}", log_file_info.path.display());

    let (config, config_error) = Config::load();
    if let Some(e) = config_error {
        eprintln!("Warning: {:#}", e);
        tracing::warn!("Using default configuration: {:#}", e);
    }
    init_theme(Theme::from_config(&config));

    let dir = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))?;
    tracing::info!("Grove started in {}", dir.display());

    let mut app = App::new(config, GitRepo::new(dir));

    let mut tui = Tui::new()?;
    tui.enter()?;
    let result = app::run(&mut app, &mut tui);
    tui.exit()?;
    result?;

    match app.handoff_target() {
        Some(target) => {
            println!("{}", target.display());
            Ok(ExitCode::from(HANDOFF_EXIT_CODE))
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
