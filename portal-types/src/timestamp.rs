//! Monotonic millisecond clock.
//!
//! Wraps the wall clock so successive readings never go backwards and never
//! repeat, which keeps time-based identifiers ordered within a process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or 0 if the system clock is set
/// before it.
#[must_use]
pub fn wall_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// A clock producing strictly increasing millisecond readings.
///
/// When the wall clock has advanced past the last reading, the wall time is
/// used. Otherwise (same millisecond, or the system clock stepped back) the
/// last reading is bumped by one.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicU64,
}

impl MonotonicClock {
    /// Creates a clock that has not produced any reading yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Returns the next reading.
    pub fn tick(&self) -> u64 {
        self.tick_at(wall_millis())
    }

    /// Returns the next reading given an explicit wall time (for testing or replay).
    pub fn tick_at(&self, now: u64) -> u64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = if now > last { now } else { last.saturating_add(1) };
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    /// Returns the most recent reading, or 0 if the clock never ticked.
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}
