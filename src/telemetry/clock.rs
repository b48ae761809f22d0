//! Clock sources for telemetry timestamps and timers.
//!
//! On Linux, uptime reads `CLOCK_MONOTONIC` (stops across suspend) and realtime
//! reads `CLOCK_BOOTTIME` (keeps counting across suspend). On other platforms
//! both fall back to a process-local `Instant` origin.

use std::sync::atomic::{AtomicI64, Ordering};

/// Milliseconds since an arbitrary, per-clock epoch.
pub type ClockReading = i64;

/// Which of the two monotonic clocks a reading comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockKind {
    /// Pauses while the device is in deep sleep.
    Uptime,
    /// Continues through deep sleep.
    Realtime,
}

impl ClockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockKind::Uptime => "uptime",
            ClockKind::Realtime => "realtime",
        }
    }

    /// Sample `clock` for this kind.
    pub fn read(self, clock: &dyn ClockSource) -> ClockReading {
        match self {
            ClockKind::Uptime => clock.uptime(),
            ClockKind::Realtime => clock.realtime(),
        }
    }
}

/// Host-supplied pair of monotonic clocks. Reads are side-effect free.
pub trait ClockSource: Send + Sync {
    fn uptime(&self) -> ClockReading;
    fn realtime(&self) -> ClockReading;
}

/// Clock backed by the operating system's monotonic clocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for SystemClock {
    fn uptime(&self) -> ClockReading {
        #[cfg(target_os = "linux")]
        {
            clock_millis(libc::CLOCK_MONOTONIC)
        }
        #[cfg(not(target_os = "linux"))]
        {
            fallback_millis()
        }
    }

    fn realtime(&self) -> ClockReading {
        #[cfg(target_os = "linux")]
        {
            clock_millis(libc::CLOCK_BOOTTIME)
        }
        #[cfg(not(target_os = "linux"))]
        {
            fallback_millis()
        }
    }
}

#[cfg(target_os = "linux")]
fn clock_millis(clock_id: libc::clockid_t) -> ClockReading {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec and both clock ids are
    // supported on every Linux kernel this crate targets.
    let rc = unsafe { libc::clock_gettime(clock_id, &mut ts) };
    debug_assert_eq!(rc, 0, "clock_gettime failed for clock {}", clock_id);
    (ts.tv_sec as i64) * 1_000 + (ts.tv_nsec as i64) / 1_000_000
}

#[cfg(not(target_os = "linux"))]
fn fallback_millis() -> ClockReading {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_millis() as i64
}

/// Manually driven clock. Readings only change when set or advanced, which
/// makes it suitable for deterministic hosts and for simulating clock skew.
#[derive(Debug, Default)]
pub struct ManualClock {
    uptime: AtomicI64,
    realtime: AtomicI64,
}

impl ManualClock {
    pub fn new(uptime: ClockReading, realtime: ClockReading) -> Self {
        Self {
            uptime: AtomicI64::new(uptime),
            realtime: AtomicI64::new(realtime),
        }
    }

    /// Advance both clocks by `millis`.
    pub fn advance(&self, millis: i64) {
        self.uptime.fetch_add(millis, Ordering::SeqCst);
        self.realtime.fetch_add(millis, Ordering::SeqCst);
    }

    /// Advance only the realtime clock, as happens while the device sleeps.
    pub fn sleep(&self, millis: i64) {
        self.realtime.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, kind: ClockKind, reading: ClockReading) {
        match kind {
            ClockKind::Uptime => self.uptime.store(reading, Ordering::SeqCst),
            ClockKind::Realtime => self.realtime.store(reading, Ordering::SeqCst),
        }
    }
}

impl ClockSource for ManualClock {
    fn uptime(&self) -> ClockReading {
        self.uptime.load(Ordering::SeqCst)
    }

    fn realtime(&self) -> ClockReading {
        self.realtime.load(Ordering::SeqCst)
    }
}
