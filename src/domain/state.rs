//! Engine state: the house pool, override flags and configuration.
//!
//! [`State`] is a plain value. Pipeline stages take it by reference and return
//! a new one; the engine owns the current value and swaps it after each
//! command.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::DomainError;
use super::house::House;
use super::money::coerce;
use super::overrides::OverrideFlags;

/// Number of house records kept regardless of the active count.
pub const POOL_SIZE: usize = 6;

/// Number of houses taking part in the hedge set (2 to 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "usize")]
pub struct HouseCount(usize);

impl HouseCount {
    pub const MIN: usize = 2;
    pub const MAX: usize = 5;

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for HouseCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for HouseCount {
    type Error = DomainError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(DomainError::InvalidHouseCount { count })
        }
    }
}

impl From<HouseCount> for usize {
    fn from(count: HouseCount) -> Self {
        count.0
    }
}

impl fmt::Display for HouseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Step that back-bet stakes are snapped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Granularity {
    #[default]
    Cent,
    TenCents,
    HalfUnit,
    Unit,
}

impl Granularity {
    pub const ALL: [Self; 4] = [Self::Cent, Self::TenCents, Self::HalfUnit, Self::Unit];

    #[must_use]
    pub fn step(self) -> Decimal {
        match self {
            Self::Cent => dec!(0.01),
            Self::TenCents => dec!(0.10),
            Self::HalfUnit => dec!(0.50),
            Self::Unit => dec!(1.00),
        }
    }
}

impl TryFrom<Decimal> for Granularity {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|granularity| granularity.step() == value)
            .ok_or_else(|| DomainError::InvalidGranularity {
                value: value.to_string(),
            })
    }
}

impl FromStr for Granularity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = coerce(trimmed);
        Self::try_from(value).map_err(|_| DomainError::InvalidGranularity {
            value: trimmed.to_string(),
        })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.step())
    }
}

impl From<Granularity> for String {
    fn from(granularity: Granularity) -> Self {
        granularity.to_string()
    }
}

/// The complete mutable state of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    houses: [House; POOL_SIZE],
    overrides: [OverrideFlags; POOL_SIZE],
    house_count: HouseCount,
    granularity: Granularity,
}

impl Default for State {
    fn default() -> Self {
        Self::new(HouseCount::default(), Granularity::default())
    }
}

impl State {
    /// Create a fresh pool with house 0 as the anchor.
    #[must_use]
    pub fn new(house_count: HouseCount, granularity: Granularity) -> Self {
        let houses = std::array::from_fn(|index| {
            if index == 0 {
                House::anchor()
            } else {
                House::default()
            }
        });
        Self {
            houses,
            overrides: [OverrideFlags::default(); POOL_SIZE],
            house_count,
            granularity,
        }
    }

    #[must_use]
    pub const fn house_count(&self) -> HouseCount {
        self.house_count
    }

    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Return a copy with a new configuration. Houses beyond the active count
    /// keep their values.
    #[must_use]
    pub fn configured(&self, house_count: HouseCount, granularity: Granularity) -> Self {
        Self {
            house_count,
            granularity,
            ..self.clone()
        }
    }

    /// Houses taking part in the computation.
    #[must_use]
    pub fn active_houses(&self) -> &[House] {
        &self.houses[..self.house_count.get()]
    }

    /// Every house in the pool, active or not.
    #[must_use]
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// Look up a house in the pool.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
    pub fn house(&self, index: usize) -> Result<&House, DomainError> {
        self.houses.get(index).ok_or(DomainError::HouseOutOfRange {
            index,
            pool: POOL_SIZE,
        })
    }

    /// Mutable access to a house together with its override flags.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
    pub(crate) fn house_mut(
        &mut self,
        index: usize,
    ) -> Result<(&mut House, &mut OverrideFlags), DomainError> {
        match (self.houses.get_mut(index), self.overrides.get_mut(index)) {
            (Some(house), Some(flags)) => Ok((house, flags)),
            _ => Err(DomainError::HouseOutOfRange {
                index,
                pool: POOL_SIZE,
            }),
        }
    }

    /// Override flags of a house. Out-of-range indices read as unflagged.
    #[must_use]
    pub fn overrides(&self, index: usize) -> OverrideFlags {
        self.overrides.get(index).copied().unwrap_or_default()
    }

    /// Index of the anchor when exactly one active house is flagged.
    #[must_use]
    pub fn anchor_index(&self) -> Option<usize> {
        let mut anchors = self
            .active_houses()
            .iter()
            .enumerate()
            .filter(|(_, house)| house.is_anchor)
            .map(|(index, _)| index);
        match (anchors.next(), anchors.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    /// Make `index` the sole anchor, or clear the anchor if it already is.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
    pub fn toggle_anchor(&mut self, index: usize) -> Result<(), DomainError> {
        let was_anchor = self.house(index)?.is_anchor;
        for (position, house) in self.houses.iter_mut().enumerate() {
            house.is_anchor = position == index && !was_anchor;
        }
        Ok(())
    }

    /// Mutable iteration over active houses and their flags.
    pub(crate) fn active_mut(
        &mut self,
    ) -> impl Iterator<Item = (usize, &mut House, &OverrideFlags)> + '_ {
        let count = self.house_count.get();
        self.houses
            .iter_mut()
            .zip(self.overrides.iter())
            .take(count)
            .enumerate()
            .map(|(index, (house, flags))| (index, house, flags))
    }
}
