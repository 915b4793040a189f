//! Stabilization delay stepping.
//!
//! The delay is a pause before reading the display so fast-scrolling text
//! can settle. Users nudge it up and down in fixed steps; the value never
//! leaves `[MIN_DELAY, MAX_DELAY]`.

use crate::errors::{IfSpeakError, Result};
use std::time::Duration;

pub const DEFAULT_DELAY: f64 = 0.1;
pub const DELAY_STEP: f64 = 0.1;
pub const MIN_DELAY: f64 = 0.0;
pub const MAX_DELAY: f64 = 1.0;

/// Rounding scale applied after stepping
const DELAY_PRECISION: f64 = 1e9;

/// One step up; anything at or above `MAX_DELAY - DELAY_STEP` lands on the ceiling
pub fn increase(delay: f64) -> f64 {
    if delay >= MAX_DELAY - DELAY_STEP {
        MAX_DELAY
    } else {
        settle(delay + DELAY_STEP)
    }
}

/// One step down; anything at or below `DELAY_STEP` lands on the floor
pub fn decrease(delay: f64) -> f64 {
    if delay <= DELAY_STEP {
        MIN_DELAY
    } else {
        settle(delay - DELAY_STEP)
    }
}

// 0.3 - 0.1 is 0.19999999999999998 in binary floating point.
fn settle(delay: f64) -> f64 {
    ((delay * DELAY_PRECISION).round() / DELAY_PRECISION).clamp(MIN_DELAY, MAX_DELAY)
}

/// Check a delay read from storage
pub fn validate(delay: f64) -> Result<f64> {
    if delay.is_finite() && (MIN_DELAY..=MAX_DELAY).contains(&delay) {
        Ok(delay)
    } else {
        Err(IfSpeakError::DelayOutOfRange {
            delay,
            min: MIN_DELAY,
            max: MAX_DELAY,
        })
    }
}

/// The spoken confirmation after a change, e.g. `"Stabilize delay: 0.2."`
pub fn delay_message(delay: f64) -> String {
    format!("Stabilize delay: {:?}.", delay)
}

/// Delay as a sleep duration; negative or non-finite values mean no sleep
pub fn as_duration(delay: f64) -> Duration {
    if delay.is_finite() && delay > 0.0 {
        Duration::from_secs_f64(delay.min(MAX_DELAY))
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_steps() {
        assert_eq!(increase(0.0), 0.1);
        assert_eq!(increase(0.1), 0.2);
        assert_eq!(increase(0.2), 0.3);
        assert_eq!(increase(0.85), 0.95);
        assert_eq!(increase(0.9), 1.0);
        assert_eq!(increase(1.0), 1.0);
    }

    #[test]
    fn test_decrease_steps() {
        assert_eq!(decrease(0.3), 0.2);
        assert_eq!(decrease(0.25), 0.15);
        assert_eq!(decrease(0.1), 0.0);
        assert_eq!(decrease(0.05), 0.0);
        assert_eq!(decrease(0.0), 0.0);
    }

    #[test]
    fn test_full_sweep_stays_in_range() {
        let mut d = MIN_DELAY;
        for _ in 0..15 {
            d = increase(d);
            assert!((MIN_DELAY..=MAX_DELAY).contains(&d));
        }
        assert_eq!(d, MAX_DELAY);
        for _ in 0..15 {
            d = decrease(d);
            assert!((MIN_DELAY..=MAX_DELAY).contains(&d));
        }
        assert_eq!(d, MIN_DELAY);
    }

    #[test]
    fn test_validate() {
        assert!(validate(0.0).is_ok());
        assert!(validate(1.0).is_ok());
        assert!(validate(-0.1).is_err());
        assert!(validate(1.5).is_err());
        assert!(validate(f64::NAN).is_err());
    }

    #[test]
    fn test_delay_message_format() {
        assert_eq!(delay_message(0.2), "Stabilize delay: 0.2.");
        assert_eq!(delay_message(1.0), "Stabilize delay: 1.0.");
        assert_eq!(delay_message(0.0), "Stabilize delay: 0.0.");
    }

    #[test]
    fn test_as_duration() {
        assert_eq!(as_duration(0.0), Duration::ZERO);
        assert_eq!(as_duration(-1.0), Duration::ZERO);
        assert_eq!(as_duration(0.5), Duration::from_millis(500));
    }
}
