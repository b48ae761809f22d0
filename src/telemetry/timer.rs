//! Stop-once duration timers that terminate in a histogram sample.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use tracing::error;

use crate::error::TimerAnomaly;
use crate::telemetry::clock::{ClockKind, ClockReading};
use crate::telemetry::facade::TelemetryFacade;

const NOT_RECORDED: i64 = -1;

/// Result of [`Timer::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// A sample of this many milliseconds went to the histogram path.
    Recorded(i32),
    /// An earlier `stop` or `cancel` already finished the timer.
    AlreadyFinished,
    /// The duration could not be recorded; nothing was sent.
    Anomaly(TimerAnomaly),
}

/// Measures one duration on a single clock. Only the first `stop` or `cancel`
/// has any effect, even when several threads race to finish the timer.
#[derive(Debug)]
pub struct Timer {
    facade: TelemetryFacade,
    name: String,
    kind: ClockKind,
    start: ClockReading,
    finished: AtomicBool,
    elapsed: AtomicI64,
}

impl Timer {
    pub(crate) fn start(facade: TelemetryFacade, name: impl Into<String>, kind: ClockKind) -> Self {
        let start = facade.now(kind);
        Self {
            facade,
            name: name.into(),
            kind,
            start,
            finished: AtomicBool::new(false),
            elapsed: AtomicI64::new(NOT_RECORDED),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clock_kind(&self) -> ClockKind {
        self.kind
    }

    pub fn start_reading(&self) -> ClockReading {
        self.start
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Finish without recording anything.
    pub fn cancel(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// Finish and record the elapsed time under the timer's name.
    pub fn stop(&self) -> StopOutcome {
        if self
            .finished
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return StopOutcome::AlreadyFinished;
        }

        let now = self.facade.now(self.kind);
        if now < self.start {
            return self.anomaly(TimerAnomaly::ClockInversion {
                name: self.name.clone(),
                start: self.start,
                now,
            });
        }

        // Non-negative here; saturates to i64::MAX for extreme readings.
        let elapsed = now.saturating_sub(self.start);

        let Ok(sample) = i32::try_from(elapsed) else {
            return self.anomaly(TimerAnomaly::Overflow {
                name: self.name.clone(),
                elapsed,
            });
        };

        self.elapsed.store(elapsed, Ordering::Release);
        self.facade.add_to_histogram(&self.name, sample);
        StopOutcome::Recorded(sample)
    }

    /// Elapsed milliseconds, if `stop` recorded a sample.
    pub fn elapsed(&self) -> Option<i64> {
        match self.elapsed.load(Ordering::Acquire) {
            NOT_RECORDED => None,
            elapsed => Some(elapsed),
        }
    }

    fn anomaly(&self, anomaly: TimerAnomaly) -> StopOutcome {
        error!(
            timer = %self.name,
            clock = self.kind.as_str(),
            "{}",
            anomaly
        );
        StopOutcome::Anomaly(anomaly)
    }
}
