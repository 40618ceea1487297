//! Delta and rate helpers for cumulative kernel counters.
//!
//! Samplers keep the previous counter value themselves and call into these
//! functions, so the arithmetic rules (regression handling, zero division)
//! are defined in one place.

use std::time::Duration;

/// Compute u64 delta, returning `None` on counter regression (reset, wrap,
/// interface removed).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

/// Converts a counter delta into a per-second rate over `interval`.
///
/// A zero interval yields zero.
pub fn per_second(delta: u64, interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    delta as f64 / secs
}

/// Rate of a cumulative counter against its previous value.
///
/// A regression is reported as zero rather than a negative rate.
pub fn counter_rate(curr: u64, prev: u64, interval: Duration) -> f64 {
    du64(curr, prev)
        .map(|delta| per_second(delta, interval))
        .unwrap_or(0.0)
}

/// Ratio of two signed deltas, zero when the denominator is zero.
pub fn delta_ratio(part: i128, whole: i128) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_du64() {
        assert_eq!(du64(10, 4), Some(6));
        assert_eq!(du64(4, 4), Some(0));
        assert_eq!(du64(3, 4), None);
    }

    #[test]
    fn test_counter_rate_one_second() {
        let rate = counter_rate(1_005_000, 1_000_000, Duration::from_secs(1));
        assert_eq!(rate, 5000.0);
    }

    #[test]
    fn test_counter_rate_longer_interval() {
        let rate = counter_rate(1_010_000, 1_000_000, Duration::from_secs(4));
        assert_eq!(rate, 2500.0);
    }

    #[test]
    fn test_counter_rate_regression_is_zero() {
        assert_eq!(counter_rate(10, 500, Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_per_second_zero_interval() {
        assert_eq!(per_second(1000, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_delta_ratio() {
        assert_eq!(delta_ratio(25, 100), 0.25);
        assert_eq!(delta_ratio(0, 0), 0.0);
        assert_eq!(delta_ratio(5, 0), 0.0);
    }
}
