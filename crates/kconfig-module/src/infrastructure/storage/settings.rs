//! TOML-based tool settings for the kconfig module.
//!
//! Read from the platform config directory:
//! - Linux:  `$XDG_CONFIG_HOME/kconfig-module/tools.toml` (or `~/.config/...`)
//! - other Unix: `~/.config/kconfig-module/tools.toml`
//!
//! ```toml
//! [tools]
//! read = "kreadconfig6"
//! write = "kwriteconfig6"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every field has a serde default, so a partial file (or no file at all)
//! is valid.

use std::path::{Path, PathBuf};

use kconfig_core::domain::tools::{DEFAULT_READ_TOOL, DEFAULT_WRITE_TOOL};
use kconfig_core::ToolNames;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "kconfig-module";
const FILE_NAME: &str = "tools.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Settings schema ───────────────────────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ToolSettings {
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Names (or paths) of the external tools.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolsSection {
    #[serde(default = "default_read_tool")]
    pub read: String,
    #[serde(default = "default_write_tool")]
    pub write: String,
}

/// Logging defaults; `RUST_LOG` still takes precedence.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// `tracing` filter directive: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_read_tool() -> String {
    DEFAULT_READ_TOOL.to_string()
}
fn default_write_tool() -> String {
    DEFAULT_WRITE_TOOL.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            read: default_read_tool(),
            write: default_write_tool(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ToolSettings {
    /// The tool pair to hand to the module runner.
    pub fn tool_names(&self) -> ToolNames {
        ToolNames {
            read: self.tools.read.clone(),
            write: self.tools.write.clone(),
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Resolves the default settings file path.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn settings_file_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join(APP_DIR).join(FILE_NAME))
}

/// Loads settings from the default location.
///
/// Without a resolvable config directory the defaults are returned, since
/// the file is optional.
///
/// # Errors
///
/// See [`load_settings_from`].
pub fn load_settings() -> Result<ToolSettings, ConfigError> {
    match settings_file_path() {
        Ok(path) => load_settings_from(&path),
        Err(ConfigError::NoPlatformConfigDir) => Ok(ToolSettings::default()),
        Err(e) => Err(e),
    }
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<ToolSettings, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ToolSettings::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
