//! Bounded exponential backoff between acquisition attempts.

use std::time::Duration;

/// First retry delay.
pub const INITIAL_DELAY: Duration = Duration::from_millis(100);

/// Growth factor applied after every retry.
pub const GROWTH_FACTOR: f64 = 1.5;

/// Ceiling for a single retry delay.
pub const MAX_DELAY: Duration = Duration::from_millis(1000);

/// Non-decreasing sequence of retry delays, capped at `max`.
///
/// With the defaults: 100ms, 150ms, 225ms, 337.5ms, ... up to 1000ms.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    factor: f64,
    max: Duration,
}

impl Backoff {
    /// Create a backoff starting at `initial` and growing by `factor`.
    ///
    /// Factors below 1.0 are raised to 1.0 so delays never shrink, and an
    /// `initial` above `max` is clamped to `max`.
    pub fn new(initial: Duration, factor: f64, max: Duration) -> Self {
        let factor = if factor.is_finite() { factor.max(1.0) } else { 1.0 };
        Self {
            next: initial.min(max),
            factor,
            max,
        }
    }

    /// Return the delay to sleep now and advance to the next one.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.next;
        // Scale in whole nanoseconds so the sequence has no float drift.
        let scaled = (self.next.as_nanos() as f64 * self.factor).round();
        let scaled = if scaled >= self.max.as_nanos() as f64 {
            self.max
        } else {
            Duration::from_nanos(scaled as u64)
        };
        self.next = scaled;
        current
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(INITIAL_DELAY, GROWTH_FACTOR, MAX_DELAY)
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}
