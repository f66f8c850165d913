use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy::MidpointAwayFromZero;

use crate::types::pow10;

/// Base-10 exponent of the most significant digit of a nonzero decimal.
///
/// `1234 -> 3`, `0.00034 -> -4`, `1 -> 0`.
pub fn decimal_exponent(x: Decimal) -> i32 {
    let normalized = x.normalize();
    let digits = normalized
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .unwrap_or(0) as i32
        + 1;
    digits - 1 - normalized.scale() as i32
}

/// Round a positive value to a single significant digit, half away from zero.
///
/// `0.00034 -> 0.0003`, `1234 -> 1000`, `0.96 -> 1`, `0.25 -> 0.3`.
/// Returns `None` for non-positive input or when the rounded value overflows.
pub fn round_to_one_significant_digit(x: Decimal) -> Option<Decimal> {
    if x <= Decimal::ZERO {
        return None;
    }

    let exponent = decimal_exponent(x);
    let rounded = if exponent < 0 {
        x.round_dp_with_strategy(exponent.unsigned_abs(), MidpointAwayFromZero)
    } else {
        let scale = pow10(exponent as u8);
        (x / scale)
            .round_dp_with_strategy(0, MidpointAwayFromZero)
            .checked_mul(scale)?
    };
    Some(rounded.normalize())
}

/// Convert a human amount into an integer count of `10^-decimals` units.
///
/// Rounds half away from zero. Returns `None` on overflow or negative input.
pub fn decimal_to_units(amount: Decimal, decimals: u8) -> Option<u64> {
    amount
        .checked_mul(pow10(decimals))?
        .round_dp_with_strategy(0, MidpointAwayFromZero)
        .to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Count of nonzero digits in the decimal representation
    fn nonzero_digits(x: Decimal) -> usize {
        x.normalize()
            .mantissa()
            .unsigned_abs()
            .to_string()
            .chars()
            .filter(|c| *c != '0')
            .count()
    }

    #[test]
    fn test_exponent() {
        assert_eq!(decimal_exponent(dec("1234")), 3);
        assert_eq!(decimal_exponent(dec("1")), 0);
        assert_eq!(decimal_exponent(dec("1.000")), 0);
        assert_eq!(decimal_exponent(dec("0.00034")), -4);
        assert_eq!(decimal_exponent(dec("0.1")), -1);
        assert_eq!(decimal_exponent(dec("1000")), 3);
    }

    #[test]
    fn test_round_examples() {
        assert_eq!(round_to_one_significant_digit(dec("0.00034")), Some(dec("0.0003")));
        assert_eq!(round_to_one_significant_digit(dec("1234")), Some(dec("1000")));
        assert_eq!(round_to_one_significant_digit(dec("0.01")), Some(dec("0.01")));
        assert_eq!(round_to_one_significant_digit(dec("7")), Some(dec("7")));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_one_significant_digit(dec("0.25")), Some(dec("0.3")));
        assert_eq!(round_to_one_significant_digit(dec("15")), Some(dec("20")));
        assert_eq!(round_to_one_significant_digit(dec("0.95")), Some(dec("1")));
        assert_eq!(round_to_one_significant_digit(dec("9.5")), Some(dec("10")));
        assert_eq!(round_to_one_significant_digit(dec("0.149")), Some(dec("0.1")));
    }

    #[test]
    fn test_round_rejects_non_positive() {
        assert_eq!(round_to_one_significant_digit(Decimal::ZERO), None);
        assert_eq!(round_to_one_significant_digit(dec("-0.5")), None);
    }

    #[test]
    fn test_round_extreme_exponents() {
        assert_eq!(
            round_to_one_significant_digit(dec("0.000000000000000000034")),
            Some(dec("0.00000000000000000003"))
        );
        assert_eq!(
            round_to_one_significant_digit(dec("340000000000000000000")),
            Some(dec("300000000000000000000"))
        );
        // 7.9e28 would round to 8e28, past Decimal::MAX
        assert_eq!(round_to_one_significant_digit(Decimal::MAX), None);
    }

    #[test]
    fn test_round_display_has_no_exponent_or_trailing_zeros() {
        let r = round_to_one_significant_digit(dec("0.0000123")).unwrap();
        assert_eq!(r.to_string(), "0.00001");
        let r = round_to_one_significant_digit(dec("0.96")).unwrap();
        assert_eq!(r.to_string(), "1");
    }

    #[test]
    fn test_round_property_single_digit_same_decade() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2_000 {
            let mantissa: i64 = rng.gen_range(1..=999_999_999);
            let scale: u32 = rng.gen_range(0..=28);
            let x = Decimal::new(mantissa, scale);
            if decimal_exponent(x) < -20 || decimal_exponent(x) > 20 {
                continue;
            }

            let r = round_to_one_significant_digit(x).unwrap();
            assert!(r > Decimal::ZERO, "{} rounded to {}", x, r);
            assert_eq!(nonzero_digits(r), 1, "{} rounded to {}", x, r);
            let drift = decimal_exponent(r) - decimal_exponent(x);
            assert!((0..=1).contains(&drift), "{} rounded to {}", x, r);
        }
    }

    #[test]
    fn test_decimal_to_units() {
        assert_eq!(decimal_to_units(dec("1.5"), 6), Some(1_500_000));
        assert_eq!(decimal_to_units(dec("1"), 0), Some(1));
        assert_eq!(decimal_to_units(dec("0.0000005"), 6), Some(1));
        assert_eq!(decimal_to_units(dec("0.0000004"), 6), Some(0));
        assert_eq!(decimal_to_units(dec("-1"), 6), None);
        assert_eq!(decimal_to_units(dec("100000000000"), 18), None);
    }
}
