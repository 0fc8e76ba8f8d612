//! Stake equalization engine.
//!
//! [`Engine`] is the single owner of the current [`State`]. Every mutating
//! command builds a new state, runs the settlement pipeline to a fixed point
//! and replaces the stored state in one step, so callers only ever observe
//! settled values.
//!
//! # Example
//!
//! ```
//! use hedgebook::application::engine::{Engine, EngineSettings};
//! use hedgebook::domain::HouseEdit;
//! use rust_decimal_macros::dec;
//!
//! let mut engine = Engine::new(EngineSettings::default());
//! engine.edit_house(0, HouseEdit::new().odd("2.00").stake("100")).unwrap();
//! engine.edit_house(1, HouseEdit::new().odd("2.10")).unwrap();
//!
//! assert_eq!(engine.state().house(1).unwrap().stake, dec!(95.24));
//! assert_eq!(engine.results().total_stake, dec!(195.24));
//! ```

use tracing::{debug, warn};

use crate::domain::convergence::{self, ConvergencePolicy, ConvergenceReport};
use crate::domain::edit::{apply_edit, HouseEdit};
use crate::domain::error::DomainError;
use crate::domain::profit::{self, Results};
use crate::domain::state::{Granularity, HouseCount, State};

/// Initial configuration of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub house_count: HouseCount,
    pub granularity: Granularity,
    pub policy: ConvergencePolicy,
}

/// Owner of the engine state and entry point for all commands.
#[derive(Debug, Clone)]
pub struct Engine {
    state: State,
    policy: ConvergencePolicy,
    report: ConvergenceReport,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Engine {
    /// Create an engine with a fresh six-house pool, house 0 anchored.
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        let mut engine = Self {
            state: State::new(settings.house_count, settings.granularity),
            policy: settings.policy,
            report: ConvergenceReport::default(),
        };
        engine.commit(engine.state.clone(), "init");
        engine
    }

    /// Change the active house count and rounding granularity.
    pub fn configure(&mut self, house_count: HouseCount, granularity: Granularity) -> &State {
        debug!(houses = %house_count, rounding = %granularity, "Configuring engine");
        let next = self.state.configured(house_count, granularity);
        self.commit(next, "configure")
    }

    /// Apply a direct edit to house `index` and settle.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
    pub fn edit_house(&mut self, index: usize, edit: HouseEdit) -> Result<&State, DomainError> {
        debug!(house = index, ?edit, "Editing house");
        let next = apply_edit(&self.state, index, &edit)?;
        Ok(self.commit(next, "edit_house"))
    }

    /// Make house `index` the anchor, or clear the anchor if it already is.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::HouseOutOfRange`] for an index outside the pool.
    pub fn set_anchor(&mut self, index: usize) -> Result<&State, DomainError> {
        let mut next = self.state.clone();
        next.toggle_anchor(index)?;
        debug!(house = index, anchor = ?next.anchor_index(), "Anchor toggled");
        Ok(self.commit(next, "set_anchor"))
    }

    /// Profit and ROI of the settled state.
    #[must_use]
    pub fn results(&self) -> Results {
        profit::evaluate(&self.state)
    }

    /// The settled state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Convergence report of the most recent command.
    #[must_use]
    pub const fn report(&self) -> ConvergenceReport {
        self.report
    }

    #[must_use]
    pub const fn policy(&self) -> ConvergencePolicy {
        self.policy
    }

    /// Settle `next` and make it the current state.
    fn commit(&mut self, next: State, command: &'static str) -> &State {
        let (settled, report) =
            convergence::settle_observed(&next, self.policy, |iteration, changed| {
                debug!(command, iteration, changed, "Pipeline pass");
            });
        if report.converged {
            debug!(
                command,
                iterations = report.iterations,
                "State settled"
            );
        } else {
            warn!(
                command,
                iterations = report.iterations,
                max_iterations = self.policy.max_iterations,
                "Stake equalization did not converge; keeping last computed state"
            );
        }
        self.state = settled;
        self.report = report;
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn new_engine_is_settled_and_empty() {
        let engine = Engine::default();
        assert!(engine.report().converged);
        let results = engine.results();
        assert_eq!(results.profit_per_house.len(), 2);
        assert_eq!(results.total_stake, Decimal::ZERO);
        assert_eq!(results.roi, Decimal::ZERO);
    }

    #[test]
    fn failed_edit_leaves_state_untouched() {
        let mut engine = Engine::default();
        engine
            .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
            .unwrap();
        let before = engine.state().clone();

        let err = engine.edit_house(6, HouseEdit::new().stake("1")).unwrap_err();
        assert_eq!(err, DomainError::HouseOutOfRange { index: 6, pool: 6 });
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn configure_resolves_with_new_granularity() {
        let mut engine = Engine::default();
        engine
            .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
            .unwrap();
        engine.edit_house(1, HouseEdit::new().odd("2.10")).unwrap();

        engine.configure(HouseCount::default(), Granularity::Unit);
        assert_eq!(engine.state().house(1).unwrap().stake, dec!(95.00));
    }

    #[test]
    fn policy_is_kept_from_settings() {
        let settings = EngineSettings {
            policy: ConvergencePolicy {
                epsilon: dec!(0.05),
                max_iterations: 3,
            },
            ..EngineSettings::default()
        };
        assert_eq!(Engine::new(settings).policy().max_iterations, 3);
    }
}
