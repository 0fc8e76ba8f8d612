//! Domain validation errors for engine commands.
//!
//! Numeric field input never fails (it coerces to zero). These errors only
//! cover structural arguments: which house a command targets and the two
//! enumerated configuration values.
//!
//! # Examples
//!
//! ```
//! use hedgebook::domain::error::DomainError;
//! use hedgebook::domain::state::HouseCount;
//!
//! let result = HouseCount::try_from(7_usize);
//! assert!(matches!(result, Err(DomainError::InvalidHouseCount { count: 7 })));
//! ```

use thiserror::Error;

/// Errors that occur when a command argument violates a domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The house index is outside the fixed pool.
    #[error("house index {index} is out of range (pool has {pool} houses)")]
    HouseOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Size of the house pool.
        pool: usize,
    },

    /// Active house count must be between 2 and 5.
    #[error("active house count must be between 2 and 5, got {count}")]
    InvalidHouseCount {
        /// The rejected count.
        count: usize,
    },

    /// Rounding granularity must be one of the supported steps.
    #[error("rounding granularity must be one of 0.01, 0.10, 0.50, 1.00, got {value}")]
    InvalidGranularity {
        /// The rejected value, as provided.
        value: String,
    },
}
