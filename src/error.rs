//! Error types for the telemetry facade.

use thiserror::Error;

/// Errors surfaced synchronously to callers of the facade.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("UI event '{event}' sent without a method (use Method::NONE for no method)")]
    MissingMethod { event: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for TelemetryError {
    fn from(err: config::ConfigError) -> Self {
        TelemetryError::ConfigError(err.to_string())
    }
}

/// Non-fatal conditions detected while stopping a timer. These are logged and
/// the sample is dropped; they never propagate as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerAnomaly {
    #[error("timer '{name}': current time {now}ms is before start time {start}ms")]
    ClockInversion { name: String, start: i64, now: i64 },

    #[error("timer '{name}': duration of {elapsed}ms is too great to add to histogram")]
    Overflow { name: String, elapsed: i64 },
}
