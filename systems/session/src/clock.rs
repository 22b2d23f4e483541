//! Fixed-threshold tick clock driven by host frame callbacks.

use std::time::Duration;

/// Accumulates frame time and reports when a tick is due.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickClock {
    accumulator: Duration,
}

impl TickClock {
    /// Adds `elapsed` and reports whether `interval` has been reached.
    ///
    /// At most one tick is reported per call. When a tick fires only the part
    /// of the accumulated time that does not fill a whole interval is carried
    /// into the next call.
    pub fn accumulate(&mut self, elapsed: Duration, interval: Duration) -> bool {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        if self.accumulator < interval {
            return false;
        }

        let interval_nanos = interval.as_nanos();
        self.accumulator = if interval_nanos == 0 {
            Duration::ZERO
        } else {
            let remainder = self.accumulator.as_nanos() % interval_nanos;
            Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX))
        };
        true
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub const fn accumulated(&self) -> Duration {
        self.accumulator
    }

    /// Discards any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
