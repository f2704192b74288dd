//! Configuration management for Grove
//!
//! Settings live in `<config dir>/grove/config.toml`. A missing file means defaults; a
//! broken one means defaults plus an error the caller reports.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which variant of each adaptive color to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::Dark => f.write_str("dark"),
            Appearance::Light => f.write_str("light"),
        }
    }
}

/// What happens after a worktree was created successfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnCreate {
    /// Stay in the TUI and show the new worktree in the list
    #[default]
    Refresh,
    /// Leave the TUI and hand the new path to the shell wrapper
    Switch,
}

impl std::fmt::Display for OnCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnCreate::Refresh => f.write_str("refresh"),
            OnCreate::Switch => f.write_str("switch"),
        }
    }
}

/// A color with one value for light terminals and one for dark terminals
///
/// Values are `#RRGGBB`. An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveColor {
    pub light: String,
    pub dark: String,
}

impl AdaptiveColor {
    fn new(light: &str, dark: &str) -> Self {
        Self {
            light: light.to_string(),
            dark: dark.to_string(),
        }
    }

    /// Pick the variant for `appearance`
    pub fn pick(&self, appearance: Appearance) -> &str {
        match appearance {
            Appearance::Light => &self.light,
            Appearance::Dark => &self.dark,
        }
    }

    fn merge(&mut self, other: &AdaptiveColor) {
        if !other.light.is_empty() {
            self.light = other.light.clone();
        }
        if !other.dark.is_empty() {
            self.dark = other.dark.clone();
        }
    }
}

/// Color palette
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Accent for selection and active states
    pub primary: AdaptiveColor,
    pub on_primary: AdaptiveColor,
    pub text: AdaptiveColor,
    pub text_muted: AdaptiveColor,
    pub border: AdaptiveColor,
    pub success: AdaptiveColor,
    pub error: AdaptiveColor,
    pub info: AdaptiveColor,
    pub on_success: AdaptiveColor,
    pub on_error: AdaptiveColor,
    pub on_info: AdaptiveColor,
}

impl ThemeColors {
    fn builtin() -> Self {
        Self {
            primary: AdaptiveColor::new("#874BFD", "#7D56F4"),
            on_primary: AdaptiveColor::new("#FFFFFF", "#FFFFFF"),
            text: AdaptiveColor::new("#333333", "#CCCCCC"),
            text_muted: AdaptiveColor::new("#666666", "#888888"),
            border: AdaptiveColor::new("#874BFD", "#7D56F4"),
            success: AdaptiveColor::new("#2E7D32", "#4CAF50"),
            error: AdaptiveColor::new("#C62828", "#EF5350"),
            info: AdaptiveColor::new("#1565C0", "#42A5F5"),
            on_success: AdaptiveColor::new("#FFFFFF", "#FFFFFF"),
            on_error: AdaptiveColor::new("#FFFFFF", "#FFFFFF"),
            on_info: AdaptiveColor::new("#FFFFFF", "#FFFFFF"),
        }
    }

    fn merge(&mut self, other: &ThemeColors) {
        self.primary.merge(&other.primary);
        self.on_primary.merge(&other.on_primary);
        self.text.merge(&other.text);
        self.text_muted.merge(&other.text_muted);
        self.border.merge(&other.border);
        self.success.merge(&other.success);
        self.error.merge(&other.error);
        self.info.merge(&other.info);
        self.on_success.merge(&other.on_success);
        self.on_error.merge(&other.on_error);
        self.on_info.merge(&other.on_info);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ThemeColors,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Light or dark color variants (default: dark)
    pub appearance: Appearance,

    /// How long feedback messages stay visible, in milliseconds (default: 3000)
    pub feedback_duration_ms: u64,

    /// Behaviour after a worktree was created (default: refresh)
    pub on_create: OnCreate,

    /// Terminal command used by the open action, e.g. `"wezterm start --cwd"`.
    /// Auto-detected when unset.
    pub terminal: Option<String>,

    pub theme: ThemeConfig,
}

fn default_feedback_duration_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            feedback_duration_ms: default_feedback_duration_ms(),
            on_create: OnCreate::default(),
            terminal: None,
            theme: ThemeConfig {
                colors: ThemeColors::builtin(),
            },
        }
    }
}

/// Shape of the file on disk; everything optional so it can be merged over defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    appearance: Option<Appearance>,
    feedback_duration_ms: Option<u64>,
    on_create: Option<OnCreate>,
    terminal: Option<String>,
    theme: ThemeConfig,
}

impl Config {
    /// Load the configuration from the default location
    pub fn load() -> (Self, Option<anyhow::Error>) {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), None),
        }
    }

    /// Load configuration from `path`
    ///
    /// Always yields a usable configuration. The error, if any, explains why (part of)
    /// the file was ignored.
    pub fn load_from(path: &Path) -> (Self, Option<anyhow::Error>) {
        let mut config = Self::default();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (config, None),
            Err(e) => {
                let err = anyhow::Error::new(e)
                    .context(format!("Failed to read config file {}", path.display()));
                return (config, Some(err));
            }
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(file) => {
                config.merge(file);
                (config, None)
            }
            Err(e) => {
                let err = anyhow::Error::new(e)
                    .context(format!("Failed to parse config file {}", path.display()));
                (config, Some(err))
            }
        }
    }

    fn merge(&mut self, file: FileConfig) {
        if let Some(appearance) = file.appearance {
            self.appearance = appearance;
        }
        if let Some(ms) = file.feedback_duration_ms.filter(|ms| *ms > 0) {
            self.feedback_duration_ms = ms;
        }
        if let Some(on_create) = file.on_create {
            self.on_create = on_create;
        }
        if let Some(terminal) = file.terminal.filter(|t| !t.trim().is_empty()) {
            self.terminal = Some(terminal);
        }
        self.theme.colors.merge(&file.theme.colors);
    }

    /// Feedback display duration
    pub fn feedback_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.feedback_duration_ms)
    }

    /// Commented sample configuration with every default spelled out
    pub fn sample_toml() -> String {
        let colors = ThemeColors::builtin();
        let entries = [
            ("primary", "Accent for selection and active states", &colors.primary),
            ("on_primary", "Text on the accent color", &colors.on_primary),
            ("text", "Main text", &colors.text),
            ("text_muted", "Secondary text", &colors.text_muted),
            ("border", "Pane borders", &colors.border),
            ("success", "Success messages", &colors.success),
            ("on_success", "", &colors.on_success),
            ("error", "Error messages", &colors.error),
            ("on_error", "", &colors.on_error),
            ("info", "Informational messages", &colors.info),
            ("on_info", "", &colors.on_info),
        ];

        let mut out = String::from(
            "# Grove configuration\n\
             # Changes take effect the next time grove starts.\n\
             \n\
             # \"dark\" or \"light\": which variant of each color to use\n\
             appearance = \"dark\"\n\
             \n\
             # How long feedback messages stay visible (milliseconds)\n\
             feedback_duration_ms = 3000\n\
             \n\
             # After creating a worktree: \"refresh\" stays in grove,\n\
             # \"switch\" exits and prints the new path for your shell to cd into\n\
             on_create = \"refresh\"\n\
             \n\
             # Terminal used by the Open action; the worktree path is appended\n\
             # terminal = \"wezterm start --cwd\"\n",
        );

        for (name, comment, color) in entries {
            out.push('\n');
            if !comment.is_empty() {
                out.push_str(&format!("# {}\n", comment));
            }
            out.push_str(&format!(
                "[theme.colors.{}]\nlight = \"{}\"\ndark = \"{}\"\n",
                name, color.light, color.dark
            ));
        }

        out
    }
}

/// Write the sample configuration to `path`, creating parent directories
pub fn write_sample_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).context("Failed to create config directory")?;
    }
    std::fs::write(path, Config::sample_toml()).context("Failed to write config file")?;
    Ok(())
}

/// Get the base configuration directory (`<config dir>/grove`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("grove"))
}

/// Get the path to the config file
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Get the path to the logs directory
///
/// Falls back to `./.grove/logs` if no config directory can be determined.
pub fn logs_dir() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from(".grove"))
        .join("logs")
}
