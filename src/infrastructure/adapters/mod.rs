//! Infrastructure adapters module
//!
//! This module contains adapters for external services and infrastructure concerns.

pub mod asset_cache;
pub mod asset_source;
pub mod pool_core;

pub use asset_cache::{AssetCache, AssetCacheStats, CachedAsset};
pub use asset_source::{AssetSource, FsAssetSource};
pub use pool_core::PoolCoreClient;
