//! Inbound adapters (driving the application).

pub mod cli;
