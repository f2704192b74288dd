//! Terminal UI module
//!
//! Surfaces (list, details, tabs, modals, feedback) and the terminal wrapper that owns
//! raw mode and the alternate screen.

pub mod action_picker;
pub mod confirm;
pub mod create_form;
pub mod details;
pub mod feedback;
pub mod item;
pub mod layout;
pub mod list;
pub mod tabs;
pub mod theme;
pub mod views;
pub mod widgets;

pub use item::{ItemDetail, ViewItem};
pub use layout::ScreenLayout;
pub use theme::{theme, Theme};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::{self, stdout};

/// Terminal UI wrapper
///
/// Restores the terminal on drop, so a panic or early return never leaves the shell in
/// raw mode.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    entered: bool,
    bracketed_paste_enabled: bool,
    mouse_capture_enabled: bool,
}

/// Where teardown problems are reported
enum ErrorHandler {
    /// Normal exit: the log is available
    Tracing,
    /// Drop: tracing may already be gone
    Stderr,
}

impl ErrorHandler {
    fn handle(&self, context: &str, error: impl std::fmt::Display) {
        match self {
            ErrorHandler::Tracing => tracing::warn!("{}: {}", context, error),
            ErrorHandler::Stderr => eprintln!("TUI teardown: {}: {}", context, error),
        }
    }
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            entered: false,
            bracketed_paste_enabled: false,
            mouse_capture_enabled: false,
        })
    }

    /// Enter TUI mode (raw mode, alternate screen, mouse capture, bracketed paste)
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        stdout()
            .execute(EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        self.entered = true;

        // Paste events feed the creation form
        if stdout().execute(EnableBracketedPaste).is_ok() {
            self.bracketed_paste_enabled = true;
        }
        if stdout().execute(EnableMouseCapture).is_ok() {
            self.mouse_capture_enabled = true;
        }

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        tracing::debug!("Entered TUI mode");
        Ok(())
    }

    /// Exit TUI mode and restore the terminal
    pub fn exit(&mut self) -> Result<()> {
        self.restore(&ErrorHandler::Tracing);
        tracing::debug!("Left TUI mode");
        Ok(())
    }

    fn restore(&mut self, handler: &ErrorHandler) {
        if self.bracketed_paste_enabled {
            if let Err(e) = stdout().execute(DisableBracketedPaste) {
                handler.handle("failed to disable bracketed paste", e);
            }
            self.bracketed_paste_enabled = false;
        }
        if self.mouse_capture_enabled {
            if let Err(e) = stdout().execute(DisableMouseCapture) {
                handler.handle("failed to disable mouse capture", e);
            }
            self.mouse_capture_enabled = false;
        }
        if !self.entered {
            return;
        }
        if let Err(e) = self.terminal.show_cursor() {
            handler.handle("failed to show cursor", e);
        }
        if let Err(e) = stdout().execute(LeaveAlternateScreen) {
            handler.handle("failed to leave alternate screen", e);
        }
        if let Err(e) = disable_raw_mode() {
            handler.handle("failed to disable raw mode", e);
        }
        self.entered = false;
    }

    pub fn size(&self) -> Result<Rect> {
        Ok(self.terminal.size()?)
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.restore(&ErrorHandler::Stderr);
    }
}
