// Autoplay progress: fraction of the interval elapsed since the last restart.
// Display only; never drives navigation.

use crate::types::{Timestamp, TimerHandle};

/// Fraction of `interval_ms` elapsed between `started` and `now`, clamped to [0, 1].
pub fn elapsed_fraction(started: Timestamp, now: Timestamp, interval_ms: u32) -> f64 {
    let interval_us = u64::from(interval_ms) * 1000;
    if interval_us == 0 {
        return 1.0;
    }
    (now.micros_since(started) as f64 / interval_us as f64).min(1.0)
}

/// A running progress sampler: the timer that drives it and when it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRun {
    pub handle: TimerHandle,
    pub started: Timestamp,
}

impl ProgressRun {
    pub fn new(handle: TimerHandle, started: Timestamp) -> Self {
        ProgressRun { handle, started }
    }

    pub fn fraction_at(&self, now: Timestamp, interval_ms: u32) -> f64 {
        elapsed_fraction(self.started, now, interval_ms)
    }
}
