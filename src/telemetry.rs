//! Telemetry domain: clocks, call records, readiness gate, facade and timers.
//!
//! All telemetry times are relative to one of two clocks:
//!
//! * Realtime since boot, including deep sleep. Used as a substitute for wall
//!   clock and for every UI session/event timestamp.
//! * Uptime since boot, excluding deep sleep. Used to avoid timing a user
//!   activity while the device is asleep.

pub mod calls;
pub mod clock;
pub mod contract;
pub mod engine;
pub mod facade;
pub mod gate;
pub mod queue;
pub mod timer;

pub use calls::DeferredCall;
pub use clock::{ClockKind, ClockReading, ClockSource, ManualClock, SystemClock};
pub use contract::{session_name, Event, Method, Reason, Session};
pub use engine::{Engine, RecordingEngine};
pub use facade::{TelemetryFacade, UiEventBuilder};
pub use gate::{Dispatch, ReadinessGate};
pub use queue::DeferredCallQueue;
pub use timer::{StopOutcome, Timer};
