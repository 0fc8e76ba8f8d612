//! Stake/liability relation for lay bets.
//!
//! A lay house satisfies `liability = stake * (final_odd - 1)` whenever
//! `final_odd > 1`. Which side is dependent follows the most recent direct
//! edit. At or below even odds the relation is degenerate and the dependent
//! side is left blank.

use rust_decimal::Decimal;

use super::house::House;
use super::money::{checked_ratio, to_cents, Amount, Odd};
use super::overrides::OverrideFlags;

/// What changed on a house, deciding which side of the relation is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Stake edited; liability follows.
    Stake,
    /// Liability edited; stake follows.
    Liability,
    /// Raw odd, boost or freebet changed; liability follows the current stake.
    Odd,
    /// House switched into lay mode; liability follows the current stake.
    LayEnabled,
}

/// Liability implied by a lay stake, or `None` when the odd is at or below 1.
#[must_use]
pub fn liability_for(stake: Amount, final_odd: Odd) -> Option<Amount> {
    if final_odd <= Decimal::ONE {
        return None;
    }
    Some(to_cents(stake.saturating_mul(final_odd - Decimal::ONE)))
}

/// Lay stake implied by a liability, or `None` when the odd is at or below 1.
#[must_use]
pub fn stake_for(liability: Amount, final_odd: Odd) -> Option<Amount> {
    checked_ratio(liability, final_odd - Decimal::ONE).map(to_cents)
}

/// Apply the relation after a direct edit.
///
/// Back houses are left untouched. A liability edit at degenerate odds blanks
/// the stake to zero; the other triggers blank the liability.
pub fn apply(house: &mut House, trigger: Trigger) {
    if !house.is_lay {
        return;
    }
    match trigger {
        Trigger::Liability => {
            house.stake = stake_for(house.liability_or_zero(), house.final_odd)
                .unwrap_or(Decimal::ZERO);
        }
        Trigger::Stake | Trigger::Odd | Trigger::LayEnabled => {
            house.liability = liability_for(house.stake, house.final_odd);
        }
    }
}

/// Re-establish the relation during a pipeline pass.
///
/// The field owned by the user stays fixed: a flagged liability drives the
/// stake, otherwise the stake drives the liability. When both are flagged the
/// house is left as the user set it. Only changes larger than `epsilon` are
/// written. Returns whether the house changed.
pub fn reconcile(house: &mut House, flags: &OverrideFlags, epsilon: Decimal) -> bool {
    if !house.is_lay || house.final_odd <= Decimal::ONE {
        return false;
    }

    match (flags.stake, flags.liability) {
        (true, true) => false,
        (false, true) => {
            let Some(stake) = stake_for(house.liability_or_zero(), house.final_odd) else {
                return false;
            };
            if (stake - house.stake).abs() > epsilon {
                house.stake = stake;
                return true;
            }
            false
        }
        (_, false) => {
            let Some(liability) = liability_for(house.stake, house.final_odd) else {
                return false;
            };
            let drift = (liability - house.liability_or_zero()).abs();
            if drift > epsilon || (house.liability.is_none() && drift.is_zero()) {
                house.liability = Some(liability);
                return true;
            }
            false
        }
    }
}
