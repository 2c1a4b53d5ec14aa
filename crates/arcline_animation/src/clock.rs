//! Repeating linear clock
//!
//! Progress runs linearly from 0 to 1 over one period and wraps back to 0.
//! The clock is advanced by the caller with frame deltas; it never reads the
//! wall clock itself, so ticks are deterministic under test.

use std::time::Duration;

/// Shortest period accepted by the clock
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Default reveal period
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatingClock {
    period: Duration,
    elapsed: Duration,
    cycles: u64,
}

impl Default for RepeatingClock {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl RepeatingClock {
    /// Create a clock with the given period (at least `MIN_PERIOD`)
    pub fn new(period: Duration) -> Self {
        if period < MIN_PERIOD {
            tracing::warn!(?period, "clock period too short, using {:?}", MIN_PERIOD);
        }
        Self {
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
            cycles: 0,
        }
    }

    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Completed periods since the clock started
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Advance by `dt` and return the new progress
    pub fn advance(&mut self, dt: Duration) -> f32 {
        let period = self.period.as_nanos();
        let total = self.elapsed.as_nanos() + dt.as_nanos();
        let wraps = total / period;
        if wraps > 0 {
            tracing::trace!(wraps, "clock wrapped");
        }
        self.cycles = self.cycles.saturating_add(wraps as u64);
        self.elapsed = Duration::from_nanos((total % period) as u64);
        self.progress()
    }

    /// Fraction of the current period elapsed, in `0..1`
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.period.as_secs_f64()) as f32
    }

    /// Back to the start of a period
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progress() {
        let mut clock = RepeatingClock::from_millis(1000);
        assert_eq!(clock.progress(), 0.0);

        assert!((clock.advance(Duration::from_millis(250)) - 0.25).abs() < 1e-6);
        assert!((clock.advance(Duration::from_millis(500)) - 0.75).abs() < 1e-6);
        assert_eq!(clock.cycles(), 0);
    }

    #[test]
    fn test_wraps_at_period() {
        let mut clock = RepeatingClock::from_millis(1000);
        clock.advance(Duration::from_millis(900));

        let progress = clock.advance(Duration::from_millis(200));
        assert!((progress - 0.1).abs() < 1e-6);
        assert_eq!(clock.cycles(), 1);

        assert_eq!(clock.advance(Duration::from_millis(2900)), 0.0);
        assert_eq!(clock.cycles(), 4);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut clock = RepeatingClock::new(Duration::ZERO);
        assert_eq!(clock.period(), MIN_PERIOD);

        let progress = clock.advance(Duration::from_micros(500));
        assert!((progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut clock = RepeatingClock::default();
        clock.advance(Duration::from_millis(4500));
        clock.reset();

        assert_eq!(clock.progress(), 0.0);
        assert_eq!(clock.cycles(), 0);
    }
}
