//! Betting house (outcome slot) record.

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{fraction, Amount, Odd, Percent};

/// Commission charged by a house on winnings.
///
/// `Disabled` is distinct from `Percent(0)`: the former means the house has
/// no commission setting at all, the latter that it is enabled at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Commission {
    #[default]
    Disabled,
    Percent(Percent),
}

impl Commission {
    /// Commission percentage, zero when disabled.
    #[must_use]
    pub fn percent(&self) -> Percent {
        match self {
            Self::Disabled => Decimal::ZERO,
            Self::Percent(value) => *value,
        }
    }

    /// Commission as a fraction of winnings (`5%` -> `0.05`).
    #[must_use]
    pub fn rate(&self) -> Decimal {
        fraction(self.percent())
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// One mutually exclusive outcome in the hedge set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct House {
    /// Odd as entered, zero when unset.
    pub raw_odd: Odd,
    /// Additive odd boost in percent.
    pub boost_percent: Percent,
    /// Odd after boost and freebet adjustment.
    pub final_odd: Odd,
    pub stake: Amount,
    /// Lay liability. `None` is the blank state left when it cannot be derived.
    pub liability: Option<Amount>,
    pub commission: Commission,
    pub is_freebet: bool,
    pub is_lay: bool,
    /// Whether this house's stake drives the solver.
    pub is_anchor: bool,
}

impl House {
    /// Create an empty house flagged as the anchor.
    #[must_use]
    pub fn anchor() -> Self {
        Self {
            is_anchor: true,
            ..Self::default()
        }
    }

    /// Liability with blank treated as zero.
    #[must_use]
    pub fn liability_or_zero(&self) -> Amount {
        self.liability.unwrap_or(Decimal::ZERO)
    }

    /// Capital this house puts at risk: liability for lay bets, stake otherwise.
    ///
    /// Freebets risk nothing.
    #[must_use]
    pub fn capital_at_risk(&self) -> Amount {
        if self.is_freebet {
            Decimal::ZERO
        } else if self.is_lay {
            self.liability_or_zero()
        } else {
            self.stake
        }
    }
}
