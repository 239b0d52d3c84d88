//! HTTP routes module
//!
//! This module contains all HTTP route configurations.

pub mod builder;
pub mod pool;

// Re-export commonly used types
pub use builder::RouteBuilder;
pub use pool::PoolRoutes;
