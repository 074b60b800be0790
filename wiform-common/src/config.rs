//! Configuration loading
//!
//! Bootstrap configuration comes from a single TOML file. The file is
//! located in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `WIFORM_CONFIG` environment variable
//! 3. `<user config dir>/wiform/config.toml`
//! 4. Built-in defaults (fallback)
//!
//! A missing file never prevents startup: defaults are used and the
//! outcome is returned as [`ConfigSource::Missing`]. A file that exists but
//! does not parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "WIFORM_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    ///
    /// Default: 8003
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Refinement pipeline policy (optional)
    #[serde(default)]
    pub refiner: RefinerConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            refiner: RefinerConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Which digits of an over-long ID number survive truncation to 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdTruncation {
    /// Keep the first 9 digits (trailing digits treated as noise)
    #[default]
    KeepFirst,
    /// Keep the last 9 digits (leading digits treated as noise)
    KeepLast,
}

/// Refinement pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinerConfig {
    /// Truncation policy for ID numbers longer than 9 digits
    #[serde(default)]
    pub id_truncation: IdTruncation,

    /// Append the accident-location override rule to the pipeline
    #[serde(default)]
    pub accident_location_override: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8003
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    UserConfigDir(PathBuf),
    /// A file was requested but does not exist; built-in defaults apply
    Missing(PathBuf),
    /// No file requested and none in the user config dir
    Defaults,
}

impl ConfigSource {
    /// The file the configuration was read from
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::UserConfigDir(p) => Some(p),
            ConfigSource::Missing(_) | ConfigSource::Defaults => None,
        }
    }

    /// Log the resolution outcome; call once the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::Missing(path) => warn!(
                path = %path.display(),
                "Config file not found, using built-in defaults"
            ),
            ConfigSource::Defaults => info!("No config file found, using built-in defaults"),
            source => {
                if let Some(path) = source.path() {
                    info!(path = %path.display(), source = ?source, "Configuration loaded");
                }
            }
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Default per-user config file location, if the platform has one
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wiform").join("config.toml"))
}

/// Resolve and load configuration following the priority order above
pub fn resolve_config(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let source = if let Some(path) = cli_arg {
        ConfigSource::CommandLine(path.to_path_buf())
    } else if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        ConfigSource::Environment(PathBuf::from(path))
    } else {
        match default_config_path() {
            Some(path) if path.exists() => ConfigSource::UserConfigDir(path),
            _ => ConfigSource::Defaults,
        }
    };

    let Some(path) = source.path() else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        let missing = ConfigSource::Missing(path.to_path_buf());
        return Ok((TomlConfig::default(), missing));
    }

    let config = load_toml_config(path).map_err(|e| match e {
        Error::TomlParse(err) => Error::Config(format!("{}: {}", path.display(), err)),
        other => other,
    })?;

    Ok((config, source))
}
