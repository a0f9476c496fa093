//! Time primitives for sleep sort
//!
//! A value is converted to a real delay through a fixed unit scale:
//! one value unit is one nanosecond of suspension.

use std::time::Duration;

/// Nanoseconds of delay per unit of value
pub const UNIT_NANOS: u64 = 1;

/// Seconds of delay per unit of value
pub const UNIT_SECONDS: f64 = UNIT_NANOS as f64 * 1e-9;

/// Delay a task holding `value` suspends for before appending
#[inline]
pub fn delay_for(value: u64) -> Duration {
    Duration::from_nanos(value.saturating_mul(UNIT_NANOS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_is_nanoseconds() {
        assert_eq!(UNIT_NANOS, 1);
        assert!((UNIT_SECONDS - 1e-9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delay_for() {
        assert_eq!(delay_for(0), Duration::ZERO);
        assert_eq!(delay_for(5), Duration::from_nanos(5));
        assert_eq!(delay_for(1_500_000_000), Duration::from_millis(1500));
    }

    #[test]
    fn test_delay_for_is_monotonic() {
        let mut last = Duration::ZERO;
        for v in [0u64, 1, 2, 999, 1_000, 1_000_000, u64::MAX] {
            let d = delay_for(v);
            assert!(d >= last);
            last = d;
        }
    }
}
