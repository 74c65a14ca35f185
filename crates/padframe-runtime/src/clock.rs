#![forbid(unsafe_code)]

//! Frame timekeeping.

use std::time::Duration;

/// Elapsed-time tracker over the platform's monotonic clock.
///
/// `elapsed` returns the seconds since the previous call; the first call
/// after creation or after a [`reset`](FrameClock::reset) returns 0, so
/// suspended time never leaks into frame deltas.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Duration>,
}

impl FrameClock {
    /// Create a clock with no reference point.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Seconds elapsed since the previous call, given the current monotonic
    /// reading. 0 when no reference point exists yet.
    pub fn elapsed(&mut self, now: Duration) -> f32 {
        let delta = match self.last {
            Some(previous) => now.saturating_sub(previous).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        delta
    }

    /// Drop the reference point. The next `elapsed` call returns 0.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_returns_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn subsequent_calls_return_delta() {
        let mut clock = FrameClock::new();
        clock.elapsed(Duration::from_secs(5));
        let dt = clock.elapsed(Duration::from_millis(5250));
        assert!((dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn reset_suppresses_suspended_time() {
        let mut clock = FrameClock::new();
        clock.elapsed(Duration::from_secs(1));
        clock.reset();
        // A long gap elapsed while suspended; it must not be reported.
        assert_eq!(clock.elapsed(Duration::from_secs(100)), 0.0);
        let dt = clock.elapsed(Duration::from_millis(100_016));
        assert!((dt - 0.016).abs() < 1e-4);
    }
}
