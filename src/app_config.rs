use anyhow::{anyhow, Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::combiner::CombinePolicy;
use crate::session::MAX_ARGUMENT_LENGTH;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Where records are stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Interactive session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// How the add action combines the two arguments
    #[serde(default)]
    pub combine_policy: CombinePolicy,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Storage backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    // @backend: Process memory, nothing survives exit
    Memory,
    // @backend: JSON-lines file
    Json,
    // @backend: SQLite database file
    #[default]
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Storage file; defaults to a file under the user's data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Interactive session configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// Maximum argument length in characters
    #[serde(default = "default_max_argument_length")]
    pub max_argument_length: usize,

    /// Width of the separator line printed after each action
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_argument_length: default_max_argument_length(),
            separator_width: default_separator_width(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_max_argument_length() -> usize {
    MAX_ARGUMENT_LENGTH
}

fn default_separator_width() -> usize {
    50
}

impl Config {
    /// Load configuration from `path`, writing a default file if none exists
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        config.save(path)?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let max = self.session.max_argument_length;
        if max == 0 || max > MAX_ARGUMENT_LENGTH {
            return Err(anyhow!(
                "session.max_argument_length must be between 1 and {}, got {}",
                MAX_ARGUMENT_LENGTH,
                max
            ));
        }

        if self.session.separator_width == 0 {
            return Err(anyhow!("session.separator_width must be greater than 0"));
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("storage.path must not be empty when set"));
            }
            if self.storage.backend == StorageBackend::Memory {
                warn!("storage.path is ignored by the memory backend");
            }
        }

        Ok(())
    }
}
