//! Effective odd resolution.

use rust_decimal::Decimal;

use super::house::House;
use super::money::{fraction, non_negative, Odd, Percent};

/// Derive the effective odd from the raw odd, boost and freebet flag.
///
/// A freebet returns winnings only, so its odd loses the returned stake
/// (`raw - 1`). Otherwise the boost is applied multiplicatively, saturating at
/// the largest representable odd. The result is never negative.
#[must_use]
pub fn resolve(raw_odd: Odd, boost_percent: Percent, is_freebet: bool) -> Odd {
    if is_freebet {
        non_negative(raw_odd - Decimal::ONE)
    } else {
        non_negative(raw_odd.saturating_mul(Decimal::ONE + fraction(boost_percent)))
    }
}

/// Recompute `final_odd` on a house in place.
pub fn refresh(house: &mut House) {
    house.final_odd = resolve(house.raw_odd, house.boost_percent, house.is_freebet);
}
