//! Public recording surface.
//!
//! Every operation samples its arguments (including realtime timestamps) at
//! call time, then hands the resulting call to the readiness gate, which
//! forwards it to the engine or queues it for replay.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::TelemetryConfig;
use crate::error::TelemetryError;
use crate::telemetry::calls::DeferredCall;
use crate::telemetry::clock::{ClockKind, ClockReading, ClockSource};
use crate::telemetry::contract::{session_name, Event, Method, Reason, Session};
use crate::telemetry::engine::Engine;
use crate::telemetry::gate::{Dispatch, ReadinessGate};
use crate::telemetry::timer::Timer;

/// Handle for recording telemetry. Clones share the engine, clock and gate.
#[derive(Clone)]
pub struct TelemetryFacade {
    engine: Arc<dyn Engine>,
    clock: Arc<dyn ClockSource>,
    gate: Arc<ReadinessGate>,
    release_build: bool,
}

impl TelemetryFacade {
    pub fn new(
        engine: Arc<dyn Engine>,
        clock: Arc<dyn ClockSource>,
        gate: Arc<ReadinessGate>,
    ) -> Self {
        Self {
            engine,
            clock,
            gate,
            release_build: false,
        }
    }

    /// Build a facade with a fresh gate configured from `config`.
    pub fn from_config(
        engine: Arc<dyn Engine>,
        clock: Arc<dyn ClockSource>,
        config: &TelemetryConfig,
    ) -> Self {
        let gate = Arc::new(ReadinessGate::with_warn_threshold(
            config.queue.warn_threshold,
        ));
        Self::new(engine, clock, gate).with_release_build(config.release_build)
    }

    /// Release builds skip the per-event debug trace.
    pub fn with_release_build(mut self, release_build: bool) -> Self {
        self.release_build = release_build;
        self
    }

    pub fn gate(&self) -> &Arc<ReadinessGate> {
        &self.gate
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn pending_calls(&self) -> usize {
        self.gate.pending_calls()
    }

    /// External "engine has started" signal. Replays queued calls in order and
    /// returns how many were replayed.
    pub fn mark_engine_ready(&self) -> usize {
        self.gate.open(self.engine.as_ref())
    }

    pub fn uptime(&self) -> ClockReading {
        self.clock.uptime()
    }

    pub fn realtime(&self) -> ClockReading {
        self.clock.realtime()
    }

    pub(crate) fn now(&self, kind: ClockKind) -> ClockReading {
        kind.read(self.clock.as_ref())
    }

    /// Timer on the uptime clock; excludes time the device spends asleep.
    pub fn uptime_timer(&self, name: impl Into<String>) -> Timer {
        Timer::start(self.clone(), name, ClockKind::Uptime)
    }

    /// Timer on the realtime clock; includes time the device spends asleep.
    pub fn realtime_timer(&self, name: impl Into<String>) -> Timer {
        Timer::start(self.clone(), name, ClockKind::Realtime)
    }

    pub fn add_to_histogram(&self, name: &str, value: i32) {
        self.dispatch(DeferredCall::AddHistogram {
            name: name.to_string(),
            value,
        });
    }

    pub fn add_to_keyed_histogram(&self, name: &str, key: &str, value: i32) {
        self.dispatch(DeferredCall::AddKeyedHistogram {
            name: name.to_string(),
            key: key.to_string(),
            value,
        });
    }

    pub fn start_ui_session(&self, session: &Session, suffix: Option<&str>) {
        let name = session_name(session, suffix);
        debug!(session = %name, "start UI session");
        let timestamp = self.realtime();
        self.dispatch(DeferredCall::StartUiSession { name, timestamp });
    }

    pub fn stop_ui_session(&self, session: &Session, suffix: Option<&str>) {
        self.stop_ui_session_with_reason(session, suffix, &Reason::NONE);
    }

    pub fn stop_ui_session_with_reason(
        &self,
        session: &Session,
        suffix: Option<&str>,
        reason: &Reason,
    ) {
        let name = session_name(session, suffix);
        debug!(session = %name, reason = %reason, "stop UI session");
        let timestamp = self.realtime();
        self.dispatch(DeferredCall::StopUiSession {
            name,
            reason: reason.to_string(),
            timestamp,
        });
    }

    /// Send `event` with `method`, stamped now, without extras.
    pub fn send_ui_event(&self, event: &Event, method: &Method) {
        let timestamp = self.realtime();
        self.record_ui_event(event.to_string(), method, timestamp, None);
    }

    /// Send `event` with `Method::NONE`, stamped now, without extras.
    pub fn send_ui_event_default(&self, event: &Event) {
        self.send_ui_event(event, &Method::NONE);
    }

    /// Start building a UI event with an explicit timestamp or extras.
    pub fn ui_event(&self, event: &Event) -> UiEventBuilder<'_> {
        UiEventBuilder {
            facade: self,
            event: event.to_string(),
            method: None,
            timestamp: None,
            extras: None,
        }
    }

    /// Send `event:status` with no method.
    ///
    /// This bends the event schema by encoding state into the event name. It
    /// exists for data policy notifications; prefer a proper event elsewhere.
    pub fn send_ui_event_status(&self, event: &Event, status: bool) {
        let name = format!("{}:{}", event, status);
        let timestamp = self.realtime();
        self.record_ui_event(name, &Method::NONE, timestamp, None);
    }

    fn record_ui_event(
        &self,
        event: String,
        method: &Method,
        timestamp: ClockReading,
        extras: Option<String>,
    ) {
        if !self.release_build {
            debug!(
                event = %event,
                method = %method,
                timestamp,
                extras = ?extras,
                "send UI event"
            );
        }
        self.dispatch(DeferredCall::AddUiEvent {
            event,
            method: method.to_string(),
            timestamp,
            extras,
        });
    }

    fn dispatch(&self, call: DeferredCall) -> Dispatch {
        self.gate.submit(call, self.engine.as_ref())
    }
}

impl std::fmt::Debug for TelemetryFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryFacade")
            .field("gate", &self.gate)
            .field("release_build", &self.release_build)
            .finish()
    }
}

/// UI event under construction. The method is mandatory; the timestamp
/// defaults to the realtime clock when sent and extras default to none.
#[must_use = "a UI event is only recorded when sent"]
pub struct UiEventBuilder<'a> {
    facade: &'a TelemetryFacade,
    event: String,
    method: Option<Method>,
    timestamp: Option<ClockReading>,
    extras: Option<String>,
}

impl UiEventBuilder<'_> {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn timestamp(mut self, timestamp: ClockReading) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn extras(mut self, extras: impl Into<String>) -> Self {
        self.extras = Some(extras.into());
        self
    }

    /// Record the event. Fails without forwarding or queueing anything when
    /// no method was given.
    pub fn send(self) -> Result<(), TelemetryError> {
        let Some(method) = self.method else {
            error!(event = %self.event, "UI event sent without a method");
            return Err(TelemetryError::MissingMethod { event: self.event });
        };
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| self.facade.realtime());
        self.facade
            .record_ui_event(self.event, &method, timestamp, self.extras);
        Ok(())
    }
}
