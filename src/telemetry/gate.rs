//! One-way readiness gate in front of the engine.
//!
//! The gate and the deferred queue share one mutex: deciding whether to
//! enqueue and draining the queue can never interleave, so a call racing the
//! transition is either replayed by the drain or forwarded after it.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::telemetry::calls::DeferredCall;
use crate::telemetry::engine::Engine;
use crate::telemetry::queue::DeferredCallQueue;

/// What happened to a submitted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Forwarded,
    Deferred,
}

struct Pending {
    queue: DeferredCallQueue,
    warned: bool,
}

/// NotReady until [`ReadinessGate::open`] runs once; Ready forever after.
pub struct ReadinessGate {
    ready: AtomicBool,
    pending: Mutex<Pending>,
    warn_threshold: usize,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::with_warn_threshold(usize::MAX)
    }

    /// Gate that logs a warning the first time `threshold` calls are waiting.
    /// The queue itself stays unbounded.
    pub fn with_warn_threshold(threshold: usize) -> Self {
        Self {
            ready: AtomicBool::new(false),
            pending: Mutex::new(Pending {
                queue: DeferredCallQueue::new(),
                warned: false,
            }),
            warn_threshold: threshold,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Number of calls waiting for the transition.
    pub fn pending_calls(&self) -> usize {
        self.pending.lock().queue.len()
    }

    /// Forward `call` now if the engine is ready, otherwise queue it.
    pub fn submit(&self, call: DeferredCall, engine: &dyn Engine) -> Dispatch {
        if self.is_ready() {
            call.forward(engine);
            return Dispatch::Forwarded;
        }

        let mut pending = self.pending.lock();
        // The transition may have completed while we waited for the lock.
        if self.is_ready() {
            drop(pending);
            call.forward(engine);
            return Dispatch::Forwarded;
        }

        debug!(call = call.kind(), "engine not ready, deferring call");
        pending.queue.enqueue(call);
        if !pending.warned && pending.queue.len() >= self.warn_threshold {
            pending.warned = true;
            warn!(
                pending = pending.queue.len(),
                threshold = self.warn_threshold,
                "deferred telemetry queue is growing while the engine is not ready"
            );
        }
        Dispatch::Deferred
    }

    /// Flip to Ready and replay every queued call in order. Returns how many
    /// calls were replayed; a repeated signal replays nothing.
    ///
    /// Replay happens under the gate mutex, so `engine` must not call back
    /// into the facade while handling a replayed call.
    pub fn open(&self, engine: &dyn Engine) -> usize {
        let mut pending = self.pending.lock();
        if self.is_ready() {
            warn!("engine ready signal received more than once; ignoring");
            return 0;
        }

        let replayed = pending.queue.drain_in_order(|call| call.forward(engine));
        self.ready.store(true, Ordering::Release);
        info!(replayed, "telemetry engine ready");
        replayed
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("ready", &self.is_ready())
            .field("pending", &self.pending_calls())
            .finish()
    }
}
