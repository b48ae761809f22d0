//! Telemetry Facade: readiness-gated telemetry recording
//!
//! Records histogram samples, UI sessions and UI events in front of a telemetry
//! engine that may not be running yet. Calls made before the engine is ready
//! are queued with their original arguments and replayed in order once it is.

pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

pub use error::{TelemetryError, TimerAnomaly};
pub use telemetry::{
    ClockKind, ClockSource, DeferredCall, Engine, Event, ManualClock, Method, ReadinessGate,
    Reason, RecordingEngine, Session, StopOutcome, SystemClock, TelemetryFacade, Timer,
};
