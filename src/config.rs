/// Configuration for the engine and the server around it
///
/// Values come from an optional TOML file; command line flags override
/// them in `main`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Trailing window used by the all-time view
pub const DEFAULT_ALL_TIME_DAYS: u32 = 90;

/// Upper bound for the all-time window (roughly ten years)
pub const MAX_ALL_TIME_DAYS: u32 = 3660;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Settings that change computed ranges
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of the all-time view and its navigation step
    pub all_time_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            all_time_days: DEFAULT_ALL_TIME_DAYS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.all_time_days == 0 || self.all_time_days > MAX_ALL_TIME_DAYS {
            return Err(ConfigError::InvalidValue {
                field: "engine.all_time_days",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_ALL_TIME_DAYS, self.all_time_days
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no command line flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Per-user config location, e.g. `~/.config/habit_progress/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("habit_progress");
            p.push("config.toml");
            p
        })
    }
}
