//! Scenario files for `hedgebook solve`.
//!
//! A scenario lists the edits a user would type into the calculator, one
//! `[[house]]` table per house in pool order:
//!
//! ```toml
//! houses = 2
//! rounding = "0.01"
//! anchor = 0
//!
//! [[house]]
//! odd = "2.00"
//! stake = 100
//!
//! [[house]]
//! odd = "2.10"
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::application::engine::Engine;
use crate::domain::edit::HouseEdit;
use crate::domain::state::{Granularity, HouseCount, POOL_SIZE};
use crate::error::{Result, ScenarioError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Active house count. Defaults to the number of `[[house]]` entries
    /// when that exceeds the configured count.
    pub houses: Option<usize>,
    pub rounding: Option<Decimal>,
    /// Anchor house index. House 0 when absent.
    pub anchor: Option<usize>,
    #[serde(default, rename = "house")]
    pub edits: Vec<HouseEdit>,
}

impl Scenario {
    /// Parse a scenario from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] for malformed content and
    /// [`ScenarioError::TooManyHouses`] when more houses are listed than the
    /// pool holds.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content).map_err(ScenarioError::Parse)?;
        if scenario.edits.len() > POOL_SIZE {
            return Err(ScenarioError::TooManyHouses {
                count: scenario.edits.len(),
                pool: POOL_SIZE,
            }
            .into());
        }
        Ok(scenario)
    }

    /// Load a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ScenarioError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// House count to configure, given the engine's current count.
    fn house_count(&self, current: HouseCount) -> Result<HouseCount> {
        let requested = self
            .houses
            .or_else(|| (self.edits.len() > current.get()).then_some(self.edits.len()));
        match requested {
            Some(count) => Ok(HouseCount::try_from(count)?),
            None => Ok(current),
        }
    }

    /// Replay the scenario through `engine`: configuration, then anchor, then
    /// each house edit in order.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an invalid house count, rounding step or
    /// anchor index.
    pub fn apply(&self, engine: &mut Engine) -> Result<()> {
        let state = engine.state();
        let house_count = self.house_count(state.house_count())?;
        let granularity = match self.rounding {
            Some(step) => Granularity::try_from(step)?,
            None => state.granularity(),
        };
        if house_count != state.house_count() || granularity != state.granularity() {
            engine.configure(house_count, granularity);
        }

        if let Some(anchor) = self.anchor {
            if !engine.state().house(anchor)?.is_anchor {
                engine.set_anchor(anchor)?;
            }
        }

        for (index, edit) in self.edits.iter().enumerate() {
            if edit.is_empty() {
                continue;
            }
            engine.edit_house(index, edit.clone())?;
        }
        debug!(
            houses = %engine.state().house_count(),
            edits = self.edits.len(),
            "Scenario applied"
        );
        Ok(())
    }
}
