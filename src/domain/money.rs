//! Monetary and odds arithmetic on `Decimal`.
//!
//! Every amount in the engine (stakes, liabilities, odds, percentages) is a
//! [`Decimal`]. This module holds the coercion rules for loosely typed input
//! and the rounding helpers shared by the solver and the lay relation.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Stake, liability or profit amount.
pub type Amount = Decimal;

/// Decimal odd (European format).
pub type Odd = Decimal;

/// Percentage value where `5` means 5%.
pub type Percent = Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Parse loosely formatted numeric text, falling back to zero.
///
/// Accepts plain and scientific notation. Blank or non-numeric text yields
/// zero; input is never rejected.
#[must_use]
pub fn coerce(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Convert a float to a decimal, mapping NaN and infinities to zero.
#[must_use]
pub fn coerce_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Clamp to the non-negative range.
#[must_use]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Fix a value to two decimal places, midpoint away from zero.
#[must_use]
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Snap a value to the nearest multiple of `step`, then fix to cents.
///
/// A non-positive step, or a value too large to divide by the step, leaves
/// the value at cent precision.
#[must_use]
pub fn snap(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return to_cents(value);
    }
    value
        .checked_div(step)
        .map(|units| units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|units| units.checked_mul(step))
        .map_or_else(|| to_cents(value), to_cents)
}

/// Divide, returning `None` when the denominator is not strictly positive.
#[must_use]
pub fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    numerator.checked_div(denominator)
}

/// Convert a percentage to a fraction (`5` -> `0.05`).
#[must_use]
pub fn fraction(percent: Percent) -> Decimal {
    percent / HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coerce_parses_plain_and_scientific_text() {
        assert_eq!(coerce("2.10"), dec!(2.10));
        assert_eq!(coerce("  95 "), dec!(95));
        assert_eq!(coerce("1e2"), dec!(100));
    }

    #[test]
    fn coerce_falls_back_to_zero() {
        assert_eq!(coerce(""), Decimal::ZERO);
        assert_eq!(coerce("   "), Decimal::ZERO);
        assert_eq!(coerce("abc"), Decimal::ZERO);
    }

    #[test]
    fn coerce_f64_rejects_non_finite() {
        assert_eq!(coerce_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce_f64(2.5), dec!(2.5));
    }

    #[test]
    fn to_cents_rounds_half_away_from_zero() {
        assert_eq!(to_cents(dec!(95.238095)), dec!(95.24));
        assert_eq!(to_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(to_cents(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn snap_uses_granularity() {
        assert_eq!(snap(dec!(95.238), dec!(1.00)), dec!(95.00));
        assert_eq!(snap(dec!(95.238), dec!(0.50)), dec!(95.00));
        assert_eq!(snap(dec!(95.30), dec!(0.50)), dec!(95.50));
        assert_eq!(snap(dec!(95.238), dec!(0.10)), dec!(95.20));
        assert_eq!(snap(dec!(95.238), dec!(0.01)), dec!(95.24));
    }

    #[test]
    fn snap_of_huge_value_keeps_cents() {
        let huge = Decimal::from_scientific("1e27").unwrap();
        assert_eq!(snap(huge, dec!(0.01)), huge);
        assert_eq!(snap(Decimal::MAX, dec!(0.50)), Decimal::MAX);
    }

    #[test]
    fn snap_with_zero_step_keeps_cents() {
        assert_eq!(snap(dec!(3.14159), Decimal::ZERO), dec!(3.14));
    }

    #[test]
    fn checked_ratio_guards_denominator() {
        assert_eq!(checked_ratio(dec!(10), dec!(4)), Some(dec!(2.5)));
        assert_eq!(checked_ratio(dec!(10), Decimal::ZERO), None);
        assert_eq!(checked_ratio(dec!(10), dec!(-1)), None);
    }

    #[test]
    fn fraction_divides_by_hundred() {
        assert_eq!(fraction(dec!(5)), dec!(0.05));
    }
}
