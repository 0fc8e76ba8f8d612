//! Pure stake-equalization logic.
//!
//! Nothing in this module performs I/O or logging. Each component works on
//! plain values so it can be exercised in isolation:
//!
//! - [`odds`] - effective odd from raw odd, boost and freebet flag
//! - [`overrides`] - fields pinned by direct user edits
//! - [`lay`] - stake/liability relation for lay bets
//! - [`solver`] - stakes that equalize every outcome's gross return
//! - [`convergence`] - bounded fixed-point settlement of the pipeline
//! - [`profit`] - per-outcome profit and ROI

pub mod convergence;
pub mod edit;
pub mod error;
pub mod house;
pub mod lay;
pub mod money;
pub mod odds;
pub mod overrides;
pub mod profit;
pub mod solver;
pub mod state;

pub use convergence::{ConvergencePolicy, ConvergenceReport};
pub use edit::{apply_edit, CommissionInput, HouseEdit, NumericInput};
pub use error::DomainError;
pub use house::{Commission, House};
pub use overrides::{Field, OverrideFlags};
pub use profit::{HouseResult, Results};
pub use solver::Proposal;
pub use state::{Granularity, HouseCount, State, POOL_SIZE};
