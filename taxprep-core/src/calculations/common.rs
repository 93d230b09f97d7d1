//! Shared helpers for tax calculations.

use rust_decimal::Decimal;

/// Rounds to exactly two decimal places, half-up (midpoint away from zero).
///
/// Standard financial rounding: 0.005 becomes 0.01. Every calculation rounds
/// at the points its component specifies rather than once at the end, because
/// intermediate rounding feeds downstream threshold comparisons.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// The larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(4238.864)), dec!(4238.86));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(4238.865)), dec!(4238.87));
    }

    #[test]
    fn round_half_up_rounds_away_from_zero_for_negatives() {
        assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_half_up_preserves_exact_cents() {
        assert_eq!(round_half_up(dec!(1192.50)), dec!(1192.50));
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100), dec!(200)), dec!(200));
        assert_eq!(max(dec!(200), dec!(100)), dec!(200));
    }

    #[test]
    fn max_handles_negatives_and_zero() {
        assert_eq!(max(dec!(-50), Decimal::ZERO), Decimal::ZERO);
    }
}
