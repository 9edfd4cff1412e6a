//! Configuration management for codeblock.
//!
//! Loads configuration from ${CODEBLOCK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color_mode::ColorModePreference;
use crate::highlight::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for codeblock configuration and log directories.
    //!
    //! CODEBLOCK_HOME resolution order:
    //! 1. CODEBLOCK_HOME environment variable (if set)
    //! 2. ~/.config/codeblock (default)
    //! 3. ./.codeblock when no home directory is known

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "CODEBLOCK_HOME";

    /// Returns the codeblock home directory.
    pub fn codeblock_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".codeblock"),
            |h| h.join(".config").join("codeblock"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        codeblock_home().join("config.toml")
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> PathBuf {
        codeblock_home().join("logs")
    }
}

/// Highlight theme names per color mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark: String,
    pub light: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dark: DEFAULT_DARK_THEME.to_string(),
            light: DEFAULT_LIGHT_THEME.to_string(),
        }
    }
}

/// Clipboard transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Try OSC 52 before the system clipboard.
    pub osc52: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { osc52: true }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Light/dark preference (`auto` detects from the terminal).
    pub color_mode: ColorModePreference,

    /// Optional folder of extra `.sublime-syntax` files.
    pub syntaxes_dir: Option<PathBuf>,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns `syntaxes_dir` with a leading `~/` expanded.
    pub fn resolved_syntaxes_dir(&self) -> Option<PathBuf> {
        let dir = self.syntaxes_dir.as_ref()?;
        if let Ok(rest) = dir.strip_prefix("~")
            && let Some(home) = dirs::home_dir()
        {
            return Some(home.join(rest));
        }
        Some(dir.clone())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
