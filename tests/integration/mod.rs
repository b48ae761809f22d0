//! Integration tests for the telemetry facade

mod concurrency;
mod logging_file;
mod timers;
