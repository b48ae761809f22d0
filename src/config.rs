//! Configuration System
//!
//! Layered configuration for the facade: built-in defaults, an optional TOML
//! file, then `TELEMETRY__*` environment overrides (highest precedence).

use crate::error::TelemetryError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `TELEMETRY__RELEASE_BUILD=true` or
/// `TELEMETRY__QUEUE__WARN_THRESHOLD=512`.
pub const ENV_PREFIX: &str = "TELEMETRY";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Release builds skip per-event debug traces.
    #[serde(default)]
    pub release_build: bool,

    /// Deferred queue settings
    #[serde(default)]
    pub queue: QueueConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Deferred queue settings. The queue is never bounded; the threshold only
/// controls when a warning is logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: usize,
}

fn default_warn_threshold() -> usize {
    1024
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            warn_threshold: default_warn_threshold(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            release_build: false,
            queue: QueueConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TelemetryConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), TelemetryError> {
        let mut errors = Vec::new();
        if self.queue.warn_threshold == 0 {
            errors.push("queue.warn_threshold must be greater than zero".to_string());
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TelemetryError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}

/// Loads [`TelemetryConfig`] from defaults, file and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, reading `path` if it is given and exists.
    pub fn load(path: Option<&Path>) -> Result<TelemetryConfig, TelemetryError> {
        let mut builder = builder_with_defaults()?;

        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: TelemetryConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn builder_with_defaults(
) -> Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let logging = LoggingConfig::default();
    Config::builder()
        .set_default("release_build", false)?
        .set_default("queue.warn_threshold", default_warn_threshold() as i64)?
        .set_default("logging.level", logging.level)?
        .set_default("logging.format", logging.format)?
        .set_default("logging.output", logging.output)?
        .set_default("logging.color", logging.color)
}
