//! Shared rounding and clamping helpers for won amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the whole won, halves away from zero.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::round_won;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_won(Decimal::from_str("1629999.5").unwrap()), Decimal::from(1_630_000));
/// assert_eq!(round_won(Decimal::from_str("1629999.49").unwrap()), Decimal::from(1_629_999));
/// ```
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates to the 10-won unit, the way statutory premiums are assessed.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::floor_to_ten;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(floor_to_ten(Decimal::from_str("45907.75").unwrap()), Decimal::from(45_900));
/// ```
pub fn floor_to_ten(value: Decimal) -> Decimal {
    (value / Decimal::TEN).floor() * Decimal::TEN
}

/// Limits `value` to `[min, max]`. `min` must not exceed `max`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_won_rounds_down_below_midpoint() {
        assert_eq!(round_won(dec("123.49")), dec("123"));
    }

    #[test]
    fn test_round_won_rounds_up_at_midpoint() {
        assert_eq!(round_won(dec("123.5")), dec("124"));
    }

    #[test]
    fn test_round_won_preserves_whole_values() {
        assert_eq!(round_won(dec("19560000")), dec("19560000"));
    }

    #[test]
    fn test_floor_to_ten_truncates() {
        assert_eq!(floor_to_ten(dec("90009.99")), dec("90000"));
        assert_eq!(floor_to_ten(dec("9")), dec("0"));
    }

    #[test]
    fn test_floor_to_ten_keeps_multiples_of_ten() {
        assert_eq!(floor_to_ten(dec("354500")), dec("354500"));
    }

    #[test]
    fn test_clamp_applies_floor_and_ceiling() {
        assert_eq!(clamp(dec("5"), dec("10"), dec("20")), dec("10"));
        assert_eq!(clamp(dec("25"), dec("10"), dec("20")), dec("20"));
        assert_eq!(clamp(dec("15"), dec("10"), dec("20")), dec("15"));
    }
}
