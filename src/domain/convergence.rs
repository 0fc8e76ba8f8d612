//! Fixed-point settlement of the recompute pipeline.
//!
//! Solver output feeds back into the next pass: committed stakes change lay
//! liabilities, which the next pass reconciles, and so on. Each pass only
//! commits changes larger than an epsilon, and the number of passes is
//! capped so a feedback loop surfaces as a diagnostic instead of spinning.
//!
//! Within one pass the order is fixed:
//!
//! 1. refresh every effective odd
//! 2. reconcile lay houses (stake/liability relation)
//! 3. propose stakes with the solver
//! 4. commit material proposals, re-deriving liability for lay houses

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::lay;
use super::odds;
use super::solver::{self, Proposal};
use super::state::State;

/// Tolerance and iteration cap for settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergencePolicy {
    /// Smallest change (in currency units) worth committing.
    pub epsilon: Decimal,
    /// Maximum number of pipeline passes.
    pub max_iterations: usize,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            epsilon: dec!(0.01),
            max_iterations: 10,
        }
    }
}

/// Outcome of a settlement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConvergenceReport {
    /// Passes executed, including the final pass that found nothing to do.
    pub iterations: usize,
    /// False when the iteration cap was hit while changes were still pending.
    pub converged: bool,
}

/// Commit proposals whose stake moved by more than `epsilon`.
///
/// Returns the number of houses written.
pub fn commit(state: &mut State, proposals: &[Proposal], epsilon: Decimal) -> usize {
    let mut written = 0;
    for proposal in proposals {
        let Ok((house, _)) = state.house_mut(proposal.index) else {
            continue;
        };
        if (proposal.stake - house.stake).abs() <= epsilon {
            continue;
        }
        house.stake = proposal.stake;
        if house.is_lay {
            house.liability = proposal.liability;
        }
        written += 1;
    }
    written
}

/// Run one pipeline pass. Returns the new state and whether anything changed.
#[must_use]
pub fn pass(state: &State, epsilon: Decimal) -> (State, bool) {
    let mut next = state.clone();
    let mut changed = false;

    for (_, house, flags) in next.active_mut() {
        odds::refresh(house);
        changed |= lay::reconcile(house, flags, epsilon);
    }

    let proposals = solver::propose(&next);
    changed |= commit(&mut next, &proposals, epsilon) > 0;

    (next, changed)
}

/// Re-run passes until nothing material changes or the cap is reached.
#[must_use]
pub fn settle(state: &State, policy: ConvergencePolicy) -> (State, ConvergenceReport) {
    settle_observed(state, policy, |_, _| {})
}

/// [`settle`], calling `observe(iteration, changed)` after every pass.
#[must_use]
pub fn settle_observed(
    state: &State,
    policy: ConvergencePolicy,
    mut observe: impl FnMut(usize, bool),
) -> (State, ConvergenceReport) {
    let mut current = state.clone();
    let cap = policy.max_iterations.max(1);

    for iteration in 1..=cap {
        let (next, changed) = pass(&current, policy.epsilon);
        current = next;
        observe(iteration, changed);
        if !changed {
            return (
                current,
                ConvergenceReport {
                    iterations: iteration,
                    converged: true,
                },
            );
        }
    }

    (
        current,
        ConvergenceReport {
            iterations: cap,
            converged: false,
        },
    )
}
