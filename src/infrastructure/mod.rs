//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the pool core client, asset access and caching, and
//! HTTP handling.

pub mod adapters;
pub mod http;

// Re-export main adapters
pub use adapters::{AssetCache, FsAssetSource, PoolCoreClient};
