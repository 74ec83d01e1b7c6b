//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hublink.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use hublink_app::profiles::RampSettings;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Virtual integration settings.
    #[serde(rename = "virtual")]
    pub virtual_integration: VirtualConfig,
    /// Ramp applied by the rocker-dimmer link.
    pub dimmer: DimmerConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Activate the demo links on startup.
    pub enabled: bool,
}

/// Rocker-dimmer ramp.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DimmerConfig {
    /// Percentage points per tick.
    pub step: f64,
    pub initial_delay_ms: u64,
    pub repeat_interval_ms: u64,
}

impl Config {
    /// Load configuration from `hublink.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hublink.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HUBLINK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("HUBLINK_DIMMER_STEP")
            && let Ok(step) = val.trim().parse()
        {
            self.dimmer.step = step;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1.0..=100.0).contains(&self.dimmer.step) {
            return Err(ConfigError::Validation(
                "dimmer step must be within 1..=100".to_string(),
            ));
        }
        if self.dimmer.repeat_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "dimmer repeat interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Ramp settings for the rocker-dimmer link.
    #[must_use]
    pub fn ramp_settings(&self) -> RampSettings {
        RampSettings {
            step: self.dimmer.step,
            initial_delay: Duration::from_millis(self.dimmer.initial_delay_ms),
            repeat_interval: Duration::from_millis(self.dimmer.repeat_interval_ms),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hublinkd=info,hublink_app=info,hublink_adapter_virtual=info".to_string(),
        }
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self {
            step: 10.0,
            initial_delay_ms: 500,
            repeat_interval_ms: 200,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
