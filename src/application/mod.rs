//! Application services (use cases).
//!
//! The engine owns the state and drives the domain pipeline for each command.

pub mod engine;

pub use engine::{Engine, EngineSettings};
