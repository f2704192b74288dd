//! Opening a worktree in a new terminal window
//!
//! Detection is best effort. When no emulator can be started the caller gets an
//! equivalent `cd` command to show instead.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use thiserror::Error;

/// How a worktree ended up being opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMethod {
    /// A terminal emulator was started
    Terminal,
    /// Nothing was started; the user has to run the `cd` command themselves
    CdCommand,
}

/// Result of an open request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub success: bool,
    pub method: LaunchMethod,
    /// User-facing message
    pub message: String,
    /// Shell command that switches to the worktree
    pub cd_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("worktree path does not exist: {}", .0.display())]
    PathMissing(PathBuf),
}

/// Something that can open a directory in a new terminal
pub trait TerminalLauncher {
    fn open(&self, path: &Path) -> Result<LaunchOutcome, LaunchError>;
}

/// Launches the platform's terminal emulator
#[derive(Debug, Clone, Default)]
pub struct TerminalOpener {
    /// Explicit command (e.g. `"wezterm start --cwd"`); the path is appended
    terminal_cmd: Option<String>,
}

/// Program plus leading arguments; the directory is appended when launching
#[derive(Debug, Clone, PartialEq, Eq)]
struct Launcher {
    program: String,
    args: Vec<String>,
}

impl Launcher {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl TerminalOpener {
    /// Opener that always uses `cmd` instead of auto-detecting
    pub fn with_command(cmd: Option<String>) -> Self {
        Self {
            terminal_cmd: cmd.filter(|c| !c.trim().is_empty()),
        }
    }

    fn detect(&self) -> Option<Launcher> {
        if let Some(cmd) = &self.terminal_cmd {
            let mut parts = cmd.split_whitespace();
            let program = parts.next()?;
            let args: Vec<&str> = parts.collect();
            return Some(Launcher::new(program, &args));
        }

        if cfg!(target_os = "macos") {
            Some(detect_macos())
        } else if cfg!(windows) {
            Some(detect_windows())
        } else if cfg!(unix) {
            detect_linux()
        } else {
            None
        }
    }

    fn build_command(launcher: &Launcher, path: &Path) -> Command {
        let dir = path.display().to_string();

        if cfg!(target_os = "macos") && launcher.program == "open" {
            let app = launcher.args.get(1).map(String::as_str);
            if let Some(script) = app.and_then(|app| applescript_for(app, &dir)) {
                let mut cmd = Command::new("osascript");
                cmd.arg("-e").arg(script);
                return cmd;
            }
        }

        let mut cmd = Command::new(&launcher.program);
        if launcher.program == "xterm" {
            cmd.args(["-e", "sh", "-c"])
                .arg(format!("cd {} && exec \"${{SHELL:-sh}}\"", shell_quote(&dir)));
            return cmd;
        }
        cmd.args(&launcher.args).arg(&dir);
        cmd
    }
}

impl TerminalLauncher for TerminalOpener {
    fn open(&self, path: &Path) -> Result<LaunchOutcome, LaunchError> {
        if !path.exists() {
            return Err(LaunchError::PathMissing(path.to_path_buf()));
        }

        let cd = cd_command(path);

        if let Some(launcher) = self.detect() {
            let spawned = Self::build_command(&launcher, path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(child) => {
                    reap_in_background(child);
                    tracing::info!(terminal = %launcher.program, "Opened terminal at {}", path.display());
                    return Ok(LaunchOutcome {
                        success: true,
                        method: LaunchMethod::Terminal,
                        message: format!("Opened terminal at {}", path.display()),
                        cd_command: cd,
                    });
                }
                Err(e) => tracing::warn!("Failed to start {}: {}", launcher.program, e),
            }
        } else {
            tracing::debug!("No terminal emulator found");
        }

        Ok(LaunchOutcome {
            success: false,
            method: LaunchMethod::CdCommand,
            message: format!("Use this command to switch: {}", cd),
            cd_command: cd,
        })
    }
}

/// Wait for a detached terminal so it does not linger as a zombie once it exits
fn reap_in_background(mut child: Child) -> JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || match child.wait() {
        Ok(status) => {
            tracing::debug!(pid = child.id(), %status, "Terminal exited");
            Some(status)
        }
        Err(e) => {
            tracing::warn!(pid = child.id(), "Failed to wait for terminal: {}", e);
            None
        }
    })
}

fn detect_linux() -> Option<Launcher> {
    const CANDIDATES: &[(&str, &[&str])] = &[
        ("gnome-terminal", &["--working-directory"]),
        ("konsole", &["--workdir"]),
        ("xfce4-terminal", &["--working-directory"]),
        ("alacritty", &["--working-directory"]),
        ("kitty", &["--directory"]),
        ("wezterm", &["start", "--cwd"]),
        ("terminator", &["--working-directory"]),
        ("xterm", &[]),
    ];

    CANDIDATES
        .iter()
        .find(|(program, _)| find_in_path(program).is_some())
        .map(|(program, args)| Launcher::new(program, args))
}

fn detect_macos() -> Launcher {
    const CANDIDATES: &[(&str, &[&str])] = &[
        ("/Applications/iTerm.app", &["-a", "iTerm"]),
        (
            "/Applications/Alacritty.app",
            &["-a", "Alacritty", "--args", "--working-directory"],
        ),
        ("/Applications/kitty.app", &["-a", "kitty", "--args", "--directory"]),
        (
            "/Applications/WezTerm.app",
            &["-a", "WezTerm", "--args", "start", "--cwd"],
        ),
    ];

    CANDIDATES
        .iter()
        .find(|(bundle, _)| Path::new(bundle).exists())
        .map(|(_, args)| Launcher::new("open", args))
        .unwrap_or_else(|| Launcher::new("open", &["-a", "Terminal"]))
}

fn detect_windows() -> Launcher {
    if find_in_path("wt.exe").is_some() {
        Launcher::new("wt.exe", &["-d"])
    } else if find_in_path("pwsh.exe").is_some() {
        Launcher::new("pwsh.exe", &["-NoExit", "-Command", "Set-Location"])
    } else {
        Launcher::new("cmd.exe", &["/K", "cd /d"])
    }
}

fn applescript_for(app: &str, dir: &str) -> Option<String> {
    let cd = format!("cd {} && clear", shell_quote(dir)).replace('"', "\\\"");
    match app {
        "iTerm" => Some(format!(
            "tell application \"iTerm\"\n\
             create window with default profile\n\
             tell current session of current window\n\
             write text \"{cd}\"\n\
             end tell\n\
             end tell"
        )),
        "Terminal" => Some(format!(
            "tell application \"Terminal\"\n\
             do script \"{cd}\"\n\
             activate\n\
             end tell"
        )),
        _ => None,
    }
}

/// Locate an executable on `PATH`
fn find_in_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Quote `s` for a POSIX shell
///
/// Single quotes unless `s` contains one, in which case double quotes with `\`, `"`, `$`
/// and backtick escaped.
pub fn shell_quote(s: &str) -> String {
    if s.contains('\'') {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$")
            .replace('`', "\\`");
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", s)
    }
}

/// `cd` command that switches to `path`
pub fn cd_command(path: &Path) -> String {
    format!("cd {}", shell_quote(&path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_shell_quote_plain() {
        assert_eq!(shell_quote("/home/me/app"), "'/home/me/app'");
        assert_eq!(shell_quote("/a b/$HOME"), "'/a b/$HOME'");
    }

    #[test]
    fn test_shell_quote_with_single_quote() {
        assert_eq!(shell_quote("/it's"), "\"/it's\"");
        assert_eq!(shell_quote("/it's $x `y` \"z\""), "\"/it's \\$x \\`y\\` \\\"z\\\"\"");
        assert_eq!(shell_quote("/it's\\n"), "\"/it's\\\\n\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_process_is_reaped() {
        let child = Command::new("true").spawn().unwrap();
        let status = reap_in_background(child).join().unwrap();
        assert!(status.unwrap().success());
    }

    #[test]
    fn test_cd_command() {
        assert_eq!(cd_command(Path::new("/code/app")), "cd '/code/app'");
    }

    #[test]
    fn test_open_missing_path_is_error() {
        let opener = TerminalOpener::default();
        let missing = PathBuf::from("/definitely/not/here/grove");
        assert_eq!(
            opener.open(&missing).unwrap_err(),
            LaunchError::PathMissing(missing)
        );
    }

    #[test]
    fn test_unstartable_terminal_falls_back_to_cd_command() {
        let dir = TempDir::new().unwrap();
        let opener = TerminalOpener::with_command(Some("grove-no-such-terminal --flag".into()));

        let outcome = opener.open(dir.path()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.method, LaunchMethod::CdCommand);
        assert_eq!(outcome.cd_command, cd_command(dir.path()));
        assert_eq!(
            outcome.message,
            format!("Use this command to switch: {}", outcome.cd_command)
        );
    }

    #[test]
    fn test_custom_command_is_split() {
        let opener = TerminalOpener::with_command(Some("wezterm start --cwd".into()));
        assert_eq!(
            opener.detect(),
            Some(Launcher::new("wezterm", &["start", "--cwd"]))
        );
        assert!(TerminalOpener::with_command(Some("  ".into())).terminal_cmd.is_none());
    }
}
