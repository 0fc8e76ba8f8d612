//! Stake equalization across the hedge set.
//!
//! Given the anchor's stake, every other eligible house receives the stake
//! that makes its gross return equal to the anchor's gross return pool:
//!
//! ```text
//! pool = stake_a * odd_a * (1 - commission_a)
//! back: stake = pool / (odd * (1 - commission))
//! lay:  stake = pool / (odd - commission)
//! ```
//!
//! Back stakes are snapped to the configured granularity. Lay stakes are kept
//! at cent precision and never snapped, since liability scales the rounding
//! error by `odd - 1`.

use rust_decimal::Decimal;
use serde::Serialize;

use super::house::House;
use super::lay::liability_for;
use super::money::{checked_ratio, snap, to_cents, Amount};
use super::state::State;

/// A solver output for one non-anchor house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proposal {
    /// Pool index of the house.
    pub index: usize,
    pub stake: Amount,
    /// Liability re-derived from `stake`; only meaningful for lay houses.
    pub liability: Option<Amount>,
}

/// Gross return of the anchor, net of its commission.
///
/// Saturates at [`Decimal::MAX`] for stakes and odds whose product does not
/// fit.
#[must_use]
pub fn gross_pool(anchor: &House) -> Amount {
    anchor
        .stake
        .saturating_mul(anchor.final_odd)
        .saturating_mul(Decimal::ONE - anchor.commission.rate())
}

/// Index of the anchor when the solver can run.
///
/// Requires exactly one active anchor with a positive stake and odd.
#[must_use]
pub fn solvable_anchor(state: &State) -> Option<usize> {
    let index = state.anchor_index()?;
    let anchor = &state.active_houses()[index];
    (anchor.stake > Decimal::ZERO && anchor.final_odd > Decimal::ZERO).then_some(index)
}

/// Stake that equalizes `house` against `pool`, before rounding.
///
/// A non-positive denominator short-circuits to zero.
#[must_use]
pub fn raw_stake(house: &House, pool: Amount) -> Amount {
    let rate = house.commission.rate();
    let denominator = if house.is_lay {
        house.final_odd - rate
    } else {
        house.final_odd * (Decimal::ONE - rate)
    };
    checked_ratio(pool, denominator).unwrap_or(Decimal::ZERO)
}

/// Propose stakes for every eligible non-anchor house.
///
/// Returns nothing when no anchor can drive the solve. Houses with no odd or
/// with a user-owned stake are skipped.
#[must_use]
pub fn propose(state: &State) -> Vec<Proposal> {
    let Some(anchor_index) = solvable_anchor(state) else {
        return Vec::new();
    };
    let houses = state.active_houses();
    let pool = gross_pool(&houses[anchor_index]);
    let step = state.granularity().step();

    houses
        .iter()
        .enumerate()
        .filter(|(index, house)| {
            *index != anchor_index
                && house.final_odd > Decimal::ZERO
                && !state.overrides(*index).pins_stake(house.is_lay)
        })
        .map(|(index, house)| {
            let raw = raw_stake(house, pool);
            if house.is_lay {
                let stake = to_cents(raw);
                Proposal {
                    index,
                    stake,
                    liability: liability_for(stake, house.final_odd),
                }
            } else {
                Proposal {
                    index,
                    stake: snap(raw, step),
                    liability: None,
                }
            }
        })
        .collect()
}
