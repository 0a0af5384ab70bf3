//! Cache statistics.

use serde::{Deserialize, Serialize};

/// Snapshot of the result cache.
///
/// Serializes as `{size, maxSize, keys, hits, misses, evictions, expirations}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Live entries
    pub size: usize,
    /// Entry bound
    pub max_size: usize,
    /// Live keys, oldest insertion first
    pub keys: Vec<String>,
    #[serde(default)]
    pub hits: u64,
    #[serde(default)]
    pub misses: u64,
    /// Entries removed to make room
    #[serde(default)]
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    #[serde(default)]
    pub expirations: u64,
}

impl CacheStats {
    /// Hit rate over all lookups (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
