//! FIFO of calls waiting for the engine to become ready.

use std::collections::VecDeque;

use crate::telemetry::calls::DeferredCall;

/// Unbounded, append-only until drained. Not synchronized on its own; the
/// readiness gate owns it behind its mutex.
#[derive(Debug, Default)]
pub struct DeferredCallQueue {
    calls: VecDeque<DeferredCall>,
}

impl DeferredCallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, call: DeferredCall) {
        self.calls.push_back(call);
    }

    /// Remove every call head-first and hand it to `forward`. Returns the
    /// number of calls drained.
    pub fn drain_in_order<F>(&mut self, mut forward: F) -> usize
    where
        F: FnMut(DeferredCall),
    {
        let mut count = 0usize;
        while let Some(call) = self.calls.pop_front() {
            forward(call);
            count += 1;
        }
        count
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
