//! Call records for the five engine operations.

use crate::telemetry::clock::ClockReading;
use crate::telemetry::engine::Engine;

/// One engine operation with its arguments captured at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredCall {
    AddHistogram {
        name: String,
        value: i32,
    },
    AddKeyedHistogram {
        name: String,
        key: String,
        value: i32,
    },
    StartUiSession {
        name: String,
        timestamp: ClockReading,
    },
    StopUiSession {
        name: String,
        reason: String,
        timestamp: ClockReading,
    },
    AddUiEvent {
        event: String,
        method: String,
        timestamp: ClockReading,
        extras: Option<String>,
    },
}

impl DeferredCall {
    pub fn kind(&self) -> &'static str {
        match self {
            DeferredCall::AddHistogram { .. } => "add_histogram",
            DeferredCall::AddKeyedHistogram { .. } => "add_keyed_histogram",
            DeferredCall::StartUiSession { .. } => "start_ui_session",
            DeferredCall::StopUiSession { .. } => "stop_ui_session",
            DeferredCall::AddUiEvent { .. } => "add_ui_event",
        }
    }

    /// Replay this call onto `engine`. Consumes the record.
    pub fn forward(self, engine: &dyn Engine) {
        match self {
            DeferredCall::AddHistogram { name, value } => engine.add_histogram(&name, value),
            DeferredCall::AddKeyedHistogram { name, key, value } => {
                engine.add_keyed_histogram(&name, &key, value)
            }
            DeferredCall::StartUiSession { name, timestamp } => {
                engine.start_ui_session(&name, timestamp)
            }
            DeferredCall::StopUiSession {
                name,
                reason,
                timestamp,
            } => engine.stop_ui_session(&name, &reason, timestamp),
            DeferredCall::AddUiEvent {
                event,
                method,
                timestamp,
                extras,
            } => engine.add_ui_event(&event, &method, timestamp, extras.as_deref()),
        }
    }
}
