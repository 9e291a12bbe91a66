//! Age curve: how production scales with the player's age.
//!
//! The curve rises through the development years, peaks at
//! [`PEAK_AGE`] with a factor of exactly `1.0`, and declines after. Each
//! phase is linear in the number of years since [`ROOKIE_AGE`]:
//!
//! | Years since 22 | Raw factor |
//! |----------------|------------|
//! | < 3 | `0.70 + 0.15 * y` |
//! | 3..6 | `1.00 + 0.10 * (y - 3)` |
//! | 6..10 | `1.30 - 0.05 * (y - 6)` |
//! | 10..13 | `1.10 - 0.08 * (y - 10)` |
//! | 13+ | `0.86 - 0.06 * (y - 13)` |
//!
//! Raw factors are divided by the peak value and floored at
//! [`MIN_AGE_FACTOR`].

/// Age the raw curve is anchored on.
pub const ROOKIE_AGE: u32 = 22;
/// Age at which the factor is `1.0`.
pub const PEAK_AGE: u32 = 28;
/// Smallest factor the curve returns.
pub const MIN_AGE_FACTOR: f64 = 0.05;

/// Raw curve value at its peak.
const RAW_PEAK: f64 = 1.3;

/// Production multiplier for a player of `age`.
///
/// Non-decreasing up to [`PEAK_AGE`], non-increasing after it, always in
/// `[MIN_AGE_FACTOR, 1.0]`.
pub fn age_factor(age: u32) -> f64 {
    let age = i32::try_from(age).unwrap_or(i32::MAX);
    let rookie = i32::try_from(ROOKIE_AGE).unwrap_or(0);
    let y = f64::from(age.saturating_sub(rookie));

    let raw = if y < 3.0 {
        0.15f64.mul_add(y, 0.7)
    } else if y < 6.0 {
        0.1f64.mul_add(y - 3.0, 1.0)
    } else if y < 10.0 {
        (-0.05f64).mul_add(y - 6.0, RAW_PEAK)
    } else if y < 13.0 {
        (-0.08f64).mul_add(y - 10.0, 1.1)
    } else {
        (-0.06f64).mul_add(y - 13.0, 0.86)
    };

    (raw / RAW_PEAK).clamp(MIN_AGE_FACTOR, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_is_exactly_one() {
        assert!((age_factor(PEAK_AGE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rookie_starts_below_peak() {
        assert!((age_factor(22) - 0.7 / 1.3).abs() < 1e-12);
    }

    #[test]
    fn rises_to_peak_then_declines() {
        for age in 10..PEAK_AGE {
            assert!(
                age_factor(age) <= age_factor(age.saturating_add(1)) + 1e-12,
                "rise broken at {age}"
            );
        }
        for age in PEAK_AGE..60 {
            assert!(
                age_factor(age.saturating_add(1)) <= age_factor(age) + 1e-12,
                "decline broken at {age}"
            );
        }
    }

    #[test]
    fn extreme_ages_are_floored() {
        assert!((age_factor(0) - MIN_AGE_FACTOR).abs() < 1e-12);
        assert!((age_factor(120) - MIN_AGE_FACTOR).abs() < 1e-12);
        assert!(age_factor(u32::MAX) >= MIN_AGE_FACTOR);
    }

    #[test]
    fn late_career_matches_curve() {
        // Age 35 is year 13 on the raw curve.
        assert!((age_factor(35) - 0.86 / 1.3).abs() < 1e-12);
    }
}
