//! Adapters connecting the engine to the outside world.

pub mod inbound;
