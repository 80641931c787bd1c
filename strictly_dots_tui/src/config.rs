//! Runtime configuration for the terminal front end.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings read from `strictly_dots.toml`.
///
/// Every field has a default, so a partial file (or none at all) works.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct DotsConfig {
    /// Seed for the computer opponent; random when unset.
    #[getter(copy)]
    seed: Option<u64>,

    /// Pause between successive computer moves.
    #[getter(copy)]
    computer_delay_ms: u64,

    /// File the interactive game logs to.
    log_file: PathBuf,

    /// Fallback filter when `RUST_LOG` is unset.
    log_filter: String,
}

#[instrument]
fn default_computer_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_dots.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            seed: None,
            computer_delay_ms: default_computer_delay_ms(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl DotsConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(delay_ms = config.computer_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// A file that exists but cannot be parsed is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Pause between computer moves as a `Duration`.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
