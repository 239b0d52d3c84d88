//! Application layer - Use cases and client views
//!
//! This module contains the collaborator ports, the JSON view projections
//! and the use cases that orchestrate them for the pool's HTTP surface.

pub mod ports;
pub mod use_cases;
pub mod views;

pub use ports::{MinerStore, PoolService};
pub use use_cases::*;
pub use views::MinerViewBuilder;
