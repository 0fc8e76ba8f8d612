//! Hedgebook - stake equalization for mutually exclusive bets.
//!
//! Given one stake on an anchor house, hedgebook computes the stakes on the
//! remaining houses so that every outcome returns the same amount, taking odd
//! boosts, freebets, lay bets and commission into account.
//!
//! # Architecture
//!
//! - [`domain`] - Pure calculation: odds, lay liability, solver, convergence, profit
//! - [`application`] - The [`application::Engine`] owning state and settling each command
//! - [`infrastructure`] - Configuration loading and logging setup
//! - [`adapter`] - The command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use hedgebook::application::Engine;
//! use hedgebook::domain::HouseEdit;
//! use rust_decimal_macros::dec;
//!
//! let mut engine = Engine::default();
//! engine.edit_house(0, HouseEdit::new().odd("3.00").stake("100")).unwrap();
//! engine.edit_house(1, HouseEdit::new().odd("1.50")).unwrap();
//!
//! let results = engine.results();
//! assert_eq!(results.total_stake, dec!(300));
//! assert_eq!(results.worst_case_profit, dec!(0));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
