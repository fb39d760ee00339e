//! Monotonic time adapter.
//!
//! Wraps `std::time::Instant` so the polling loop's deadlines are immune to
//! wall-clock adjustments (NTP steps, DST). The supervisor itself never
//! reads a clock — it takes timestamps from its caller — so tests drive
//! time directly and this adapter is only used by the real daemon loop.

use std::time::Instant;

/// Millisecond-resolution monotonic clock, zeroed at construction.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created (monotonic).
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
