//! Registry configuration.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tuning knobs for the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Seconds without activity after which a game is evicted.
    inactivity_timeout_secs: u64,

    /// Seconds between eviction sweeps.
    sweep_interval_secs: u64,

    /// How many identifiers to try before giving up on `create`.
    id_attempts: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: 600,
            sweep_interval_secs: 600,
            id_attempts: 10,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration from explicit values.
    ///
    /// Durations are kept in whole seconds; anything that truncates to zero
    /// is rejected along with a zero attempt bound.
    #[track_caller]
    pub fn new(
        inactivity_timeout: Duration,
        sweep_interval: Duration,
        id_attempts: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            inactivity_timeout_secs: inactivity_timeout.as_secs(),
            sweep_interval_secs: sweep_interval.as_secs(),
            id_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            inactivity_timeout_secs = config.inactivity_timeout_secs,
            sweep_interval_secs = config.sweep_interval_secs,
            id_attempts = config.id_attempts,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Rejects zero values, which would evict everything or never create anything.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inactivity_timeout_secs == 0 {
            return Err(ConfigError::new("inactivity_timeout_secs must be positive"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::new("sweep_interval_secs must be positive"));
        }
        if self.id_attempts == 0 {
            return Err(ConfigError::new("id_attempts must be positive"));
        }
        Ok(())
    }

    /// Inactivity threshold for eviction.
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// Period of the background sweep.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Bound on identifier generation attempts.
    pub fn id_attempts(&self) -> u32 {
        self.id_attempts
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
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
