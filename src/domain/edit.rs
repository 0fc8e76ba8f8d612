//! Direct edits to a house.
//!
//! A [`HouseEdit`] is a partial record: only the fields that are present are
//! applied. Numeric fields accept numbers or decimal text; anything that does
//! not parse becomes zero.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::DomainError;
use super::house::Commission;
use super::lay::{self, Trigger};
use super::money::{coerce, coerce_f64, non_negative};
use super::odds;
use super::overrides::Field;
use super::state::State;

/// Loosely typed numeric input, coerced on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNumber")]
pub struct NumericInput(Decimal);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<RawNumber> for NumericInput {
    fn from(raw: RawNumber) -> Self {
        match raw {
            RawNumber::Integer(value) => Self(Decimal::from(value)),
            RawNumber::Float(value) => Self(coerce_f64(value)),
            RawNumber::Text(text) => Self(coerce(&text)),
        }
    }
}

impl NumericInput {
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<&str> for NumericInput {
    fn from(text: &str) -> Self {
        Self(coerce(text))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self(coerce_f64(value))
    }
}

/// Commission input: a percentage, or an explicit "disabled".
///
/// `false` and the text `disabled`/`off`/`none` disable commission; `true`
/// enables it at 0%. Percentages are clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCommission")]
pub struct CommissionInput(Commission);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommission {
    Toggle(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<RawCommission> for CommissionInput {
    fn from(raw: RawCommission) -> Self {
        match raw {
            RawCommission::Toggle(false) => Self::disabled(),
            RawCommission::Toggle(true) => Self::percent(Decimal::ZERO),
            RawCommission::Integer(value) => Self::percent(Decimal::from(value)),
            RawCommission::Float(value) => Self::percent(coerce_f64(value)),
            RawCommission::Text(text) => Self::from(text.as_str()),
        }
    }
}

impl CommissionInput {
    #[must_use]
    pub const fn disabled() -> Self {
        Self(Commission::Disabled)
    }

    #[must_use]
    pub fn percent(value: Decimal) -> Self {
        Self(Commission::Percent(
            non_negative(value).min(Decimal::ONE_HUNDRED),
        ))
    }

    #[must_use]
    pub const fn commission(self) -> Commission {
        self.0
    }
}

impl From<&str> for CommissionInput {
    fn from(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Self::disabled(),
            other => Self::percent(coerce(other)),
        }
    }
}

impl From<Decimal> for CommissionInput {
    fn from(value: Decimal) -> Self {
        Self::percent(value)
    }
}

/// Partial update of a house's user-facing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseEdit {
    #[serde(alias = "odd")]
    pub raw_odd: Option<NumericInput>,
    #[serde(alias = "boost")]
    pub boost_percent: Option<NumericInput>,
    pub stake: Option<NumericInput>,
    #[serde(alias = "responsibility")]
    pub liability: Option<NumericInput>,
    pub commission: Option<CommissionInput>,
    #[serde(alias = "freebet")]
    pub is_freebet: Option<bool>,
    #[serde(alias = "lay")]
    pub is_lay: Option<bool>,
}

impl HouseEdit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn odd(mut self, value: impl Into<NumericInput>) -> Self {
        self.raw_odd = Some(value.into());
        self
    }

    #[must_use]
    pub fn boost(mut self, value: impl Into<NumericInput>) -> Self {
        self.boost_percent = Some(value.into());
        self
    }

    #[must_use]
    pub fn stake(mut self, value: impl Into<NumericInput>) -> Self {
        self.stake = Some(value.into());
        self
    }

    #[must_use]
    pub fn liability(mut self, value: impl Into<NumericInput>) -> Self {
        self.liability = Some(value.into());
        self
    }

    #[must_use]
    pub fn commission(mut self, value: impl Into<CommissionInput>) -> Self {
        self.commission = Some(value.into());
        self
    }

    #[must_use]
    pub fn freebet(mut self, enabled: bool) -> Self {
        self.is_freebet = Some(enabled);
        self
    }

    #[must_use]
    pub fn lay(mut self, enabled: bool) -> Self {
        self.is_lay = Some(enabled);
        self
    }

    /// Whether the edit carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Which side of the lay relation this edit makes dependent.
    ///
    /// A liability edit wins over a stake edit, which wins over odd changes.
    fn trigger(&self, odd_changed: bool, lay_enabled: bool) -> Option<Trigger> {
        if self.liability.is_some() {
            Some(Trigger::Liability)
        } else if self.stake.is_some() {
            Some(Trigger::Stake)
        } else if odd_changed {
            Some(Trigger::Odd)
        } else if lay_enabled {
            Some(Trigger::LayEnabled)
        } else {
            None
        }
    }
}

/// Apply a direct edit to house `index`, returning the updated state.
///
/// Sets override flags for the edited odd, stake, liability and commission,
/// recomputes the effective odd and applies the lay relation. The result is
/// not settled; the solver has not run.
///
/// # Errors
///
/// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
pub fn apply_edit(state: &State, index: usize, edit: &HouseEdit) -> Result<State, DomainError> {
    let mut next = state.clone();
    let (house, flags) = next.house_mut(index)?;

    let mut odd_changed = false;
    if let Some(value) = edit.raw_odd {
        house.raw_odd = non_negative(value.value());
        flags.set(Field::Odd);
        odd_changed = true;
    }
    if let Some(value) = edit.boost_percent {
        house.boost_percent = value.value();
        odd_changed = true;
    }
    if let Some(enabled) = edit.is_freebet {
        odd_changed |= enabled != house.is_freebet;
        house.is_freebet = enabled;
    }
    let mut lay_enabled = false;
    if let Some(enabled) = edit.is_lay {
        lay_enabled = enabled && !house.is_lay;
        house.is_lay = enabled;
    }
    if let Some(input) = edit.commission {
        house.commission = input.commission();
        flags.set(Field::Commission);
    }
    if let Some(value) = edit.stake {
        house.stake = non_negative(value.value());
        flags.set(Field::Stake);
    }
    if let Some(value) = edit.liability {
        house.liability = Some(non_negative(value.value()));
        flags.set(Field::Liability);
    }

    odds::refresh(house);
    if let Some(trigger) = edit.trigger(odd_changed, lay_enabled) {
        lay::apply(house, trigger);
    }

    Ok(next)
}
