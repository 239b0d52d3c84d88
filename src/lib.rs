//! Proof-of-capacity pool server - the network-facing layer of a Burst pool
//!
//! This library accepts nonce submissions from miners, reports round and
//! pool statistics, and serves the operator dashboard. The ledger, miner
//! tracker and scoring engine are external collaborators reached through
//! the ports in [`application::ports`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
