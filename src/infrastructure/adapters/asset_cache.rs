//! Rendered asset cache
//!
//! Keeps minimized, templated dashboard documents in memory so a hit skips
//! both the disk read and the transform. Bounded by total rendered bytes;
//! when an insert would overflow the bound the oldest entries go first.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Cached rendered document
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub body: Arc<str>,
    pub content_type: &'static str,
    /// Insertion sequence, lower is older
    sequence: u64,
}

/// In-memory cache keyed by request path
pub struct AssetCache {
    entries: RwLock<HashMap<String, CachedAsset>>,
    max_bytes: usize,
    next_sequence: AtomicU64,
}

impl AssetCache {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_bytes,
            next_sequence: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, path: &str) -> Option<CachedAsset> {
        let entries = self.entries.read().await;
        let hit = entries.get(path).cloned();
        debug!(path = %path, hit = hit.is_some(), "Asset cache lookup");
        hit
    }

    pub async fn insert(&self, path: &str, body: Arc<str>, content_type: &'static str) {
        if body.len() > self.max_bytes {
            debug!(path = %path, size = body.len(), "Asset larger than cache, not cached");
            return;
        }

        let mut entries = self.entries.write().await;
        entries.remove(path);

        while !entries.is_empty() && total_size(&entries) + body.len() > self.max_bytes {
            Self::evict_oldest_entries(&mut entries);
        }

        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        entries.insert(
            path.to_string(),
            CachedAsset {
                body,
                content_type,
                sequence,
            },
        );
    }

    /// Remove the oldest 20% of entries, at least one
    fn evict_oldest_entries(entries: &mut HashMap<String, CachedAsset>) {
        let mut by_age: Vec<(&String, u64)> = entries.iter().map(|(k, v)| (k, v.sequence)).collect();
        by_age.sort_by_key(|(_, sequence)| *sequence);

        let to_remove = ((by_age.len() as f64 * 0.2) as usize).max(1);
        let keys: Vec<String> = by_age.iter().take(to_remove).map(|(k, _)| (*k).clone()).collect();
        for key in &keys {
            entries.remove(key);
        }

        debug!("Evicted {} oldest asset cache entries", keys.len());
    }

    pub async fn stats(&self) -> AssetCacheStats {
        let entries = self.entries.read().await;
        AssetCacheStats {
            entries: entries.len(),
            bytes: total_size(&entries),
            max_bytes: self.max_bytes,
        }
    }
}

fn total_size(entries: &HashMap<String, CachedAsset>) -> usize {
    entries.values().map(|e| e.body.len()).sum()
}

/// Cache occupancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCacheStats {
    pub entries: usize,
    pub bytes: usize,
    pub max_bytes: usize,
}
