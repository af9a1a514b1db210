//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/veidt/config.toml)
//! 3. Environment variables (VEIDT_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix
const ENV_PREFIX: &str = "VEIDT";

/// Default lifetime of a toast notification
pub const DEFAULT_TOAST_TTL_MS: u64 = 4000;

/// Default interval between image rotator advances
pub const DEFAULT_ROTATOR_INTERVAL_MS: u64 = 3500;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted record document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log file for the TUI (defaults to `<data_dir>/debug.log`)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// How long a toast stays on screen, in milliseconds
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,

    /// How often the landing page image rotator advances, in milliseconds
    #[serde(default = "default_rotator_interval_ms")]
    pub rotator_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
            rotator_interval_ms: DEFAULT_ROTATOR_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (VEIDT_DATA_DIR, VEIDT_LOG_FILE, ...)
    /// 2. Config file (~/.config/veidt/config.toml or VEIDT_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::load_from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        };

        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    ///
    /// Environment variables are applied as overrides.
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot use
    pub fn validate(&self) -> Result<()> {
        if self.rotator_interval_ms == 0 {
            bail!("rotator_interval_ms must be greater than zero");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // Unparseable numbers, and a zero rotator interval, keep the previous value
        if let Ok(val) = std::env::var(format!("{}_TOAST_TTL_MS", ENV_PREFIX)) {
            if let Ok(ms) = val.parse() {
                self.toast_ttl_ms = ms;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_ROTATOR_INTERVAL_MS", ENV_PREFIX)) {
            match val.parse() {
                Ok(0) | Err(_) => {}
                Ok(ms) => self.rotator_interval_ms = ms,
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with VEIDT_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veidt")
            .join("config.toml")
    }

    /// Path of the TUI debug log
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn rotator_interval(&self) -> Duration {
        Duration::from_millis(self.rotator_interval_ms)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("veidt")
}

fn default_toast_ttl_ms() -> u64 {
    DEFAULT_TOAST_TTL_MS
}

fn default_rotator_interval_ms() -> u64 {
    DEFAULT_ROTATOR_INTERVAL_MS
}
