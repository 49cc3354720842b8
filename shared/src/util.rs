//! Small numeric helpers

use rust_decimal::prelude::*;

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Attendance fraction (0.0..=1.0) as a percentage, 2 decimal places
pub fn to_percentage(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.499), 8.5);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(7.0), 7.0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(to_percentage(0.75), 75.0);
        assert_eq!(to_percentage(2.0 / 3.0), 66.67);
        assert_eq!(to_percentage(0.0), 0.0);
    }
}
