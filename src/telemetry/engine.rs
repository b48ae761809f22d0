//! Engine boundary: where forwarded calls end up.

use parking_lot::Mutex;

use crate::telemetry::calls::DeferredCall;
use crate::telemetry::clock::ClockReading;

/// The telemetry backend. All operations are fire-and-forget; failures are the
/// engine's own concern.
pub trait Engine: Send + Sync {
    fn add_histogram(&self, name: &str, value: i32);
    fn add_keyed_histogram(&self, name: &str, key: &str, value: i32);
    fn start_ui_session(&self, name: &str, timestamp: ClockReading);
    fn stop_ui_session(&self, name: &str, reason: &str, timestamp: ClockReading);
    fn add_ui_event(&self, event: &str, method: &str, timestamp: ClockReading, extras: Option<&str>);
}

/// In-memory engine that keeps every forwarded call in arrival order.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<DeferredCall>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of calls received so far.
    pub fn calls(&self) -> Vec<DeferredCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn take(&self) -> Vec<DeferredCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    fn push(&self, call: DeferredCall) {
        self.calls.lock().push(call);
    }
}

impl Engine for RecordingEngine {
    fn add_histogram(&self, name: &str, value: i32) {
        self.push(DeferredCall::AddHistogram {
            name: name.to_string(),
            value,
        });
    }

    fn add_keyed_histogram(&self, name: &str, key: &str, value: i32) {
        self.push(DeferredCall::AddKeyedHistogram {
            name: name.to_string(),
            key: key.to_string(),
            value,
        });
    }

    fn start_ui_session(&self, name: &str, timestamp: ClockReading) {
        self.push(DeferredCall::StartUiSession {
            name: name.to_string(),
            timestamp,
        });
    }

    fn stop_ui_session(&self, name: &str, reason: &str, timestamp: ClockReading) {
        self.push(DeferredCall::StopUiSession {
            name: name.to_string(),
            reason: reason.to_string(),
            timestamp,
        });
    }

    fn add_ui_event(&self, event: &str, method: &str, timestamp: ClockReading, extras: Option<&str>) {
        self.push(DeferredCall::AddUiEvent {
            event: event.to_string(),
            method: method.to_string(),
            timestamp,
            extras: extras.map(str::to_string),
        });
    }
}
