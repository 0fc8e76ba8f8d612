//! Per-outcome profit and overall return on investment.

use rust_decimal::Decimal;
use serde::Serialize;

use super::house::House;
use super::money::{checked_ratio, Amount, Odd};
use super::state::State;

/// Settled figures for one active house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseResult {
    pub index: usize,
    pub final_odd: Odd,
    pub stake: Amount,
    /// Only present for lay houses.
    pub liability: Option<Amount>,
    /// Net result if this house's outcome occurs.
    pub profit: Amount,
}

/// Results of the hedge set, recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results {
    /// Profit per active house, in pool order.
    pub profit_per_house: Vec<Amount>,
    /// Capital at risk across non-freebet houses.
    pub total_stake: Amount,
    /// Sum of freebet stakes.
    pub total_freebet_value: Amount,
    /// Profit of the least favorable outcome.
    pub worst_case_profit: Amount,
    /// Worst-case profit as a percentage of capital (or of freebet value when
    /// freebets are present). Negative means a guaranteed loss.
    pub roi: Decimal,
    pub houses: Vec<HouseResult>,
}

/// Net result for `house` winning, given the total capital at risk.
///
/// Lay houses keep their stake net of commission and pay out their
/// liability. Freebet commission only ever reduces a gain. Back bets apply
/// commission to the odd. Figures too large to represent saturate.
#[must_use]
pub fn house_profit(house: &House, total_stake: Amount) -> Amount {
    let net = Decimal::ONE - house.commission.rate();
    if house.is_lay {
        let exposure = total_stake.saturating_sub(house.liability_or_zero());
        house.stake.saturating_mul(net).saturating_sub(exposure)
    } else if house.is_freebet {
        let gross = house
            .stake
            .saturating_mul(house.final_odd)
            .saturating_sub(total_stake);
        if gross > Decimal::ZERO {
            gross.saturating_mul(net)
        } else {
            gross
        }
    } else {
        house
            .stake
            .saturating_mul(house.final_odd)
            .saturating_mul(net)
            .saturating_sub(total_stake)
    }
}

/// Return on investment in percent.
///
/// Freebet value takes precedence as the denominator; with neither freebets
/// nor capital at risk the ROI is zero.
#[must_use]
pub fn roi(worst_case_profit: Amount, total_stake: Amount, total_freebet_value: Amount) -> Decimal {
    let denominator = if total_freebet_value > Decimal::ZERO {
        total_freebet_value
    } else {
        total_stake
    };
    checked_ratio(worst_case_profit, denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Evaluate the active houses of a settled state.
#[must_use]
pub fn evaluate(state: &State) -> Results {
    evaluate_houses(state.active_houses())
}

/// Evaluate an arbitrary set of mutually exclusive houses.
#[must_use]
pub fn evaluate_houses(houses: &[House]) -> Results {
    let total_stake = houses
        .iter()
        .map(House::capital_at_risk)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_freebet_value = houses
        .iter()
        .filter(|house| house.is_freebet)
        .map(|house| house.stake)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let rows: Vec<HouseResult> = houses
        .iter()
        .enumerate()
        .map(|(index, house)| HouseResult {
            index,
            final_odd: house.final_odd,
            stake: house.stake,
            liability: house.is_lay.then(|| house.liability_or_zero()),
            profit: house_profit(house, total_stake),
        })
        .collect();

    let worst_case_profit = rows
        .iter()
        .map(|row| row.profit)
        .min()
        .unwrap_or(Decimal::ZERO);

    Results {
        profit_per_house: rows.iter().map(|row| row.profit).collect(),
        total_stake,
        total_freebet_value,
        worst_case_profit,
        roi: roi(worst_case_profit, total_stake, total_freebet_value),
        houses: rows,
    }
}
