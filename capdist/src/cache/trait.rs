//! Cache trait definition for dependency injection.

use crate::cache::{CacheKey, CacheStats};
use crate::result::DistanceResult;
use std::sync::Arc;
use std::time::Duration;

/// Cache abstraction for computed results.
///
/// Lets the service swap the TTL cache for a no-op one (or a test double)
/// without changing its request path. Operations never fail; a cache that
/// cannot serve a value simply misses.
pub trait Cache: Send + Sync {
    /// Cached result for `key`, or `None` if absent or expired.
    fn get(&self, key: &CacheKey) -> Option<Arc<DistanceResult>>;

    /// Store a result. `ttl` of `None` uses the cache's default.
    fn set(&self, key: CacheKey, value: Arc<DistanceResult>, ttl: Option<Duration>);

    /// Whether a live entry exists for `key`.
    fn contains(&self, key: &CacheKey) -> bool;

    /// Remove every entry.
    fn clear(&self);

    /// Current statistics.
    fn stats(&self) -> CacheStats;
}

/// Cache that never stores anything.
///
/// Used when caching is disabled in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

impl NoOpCache {
    pub fn new() -> Self {
        Self
    }
}

impl Cache for NoOpCache {
    fn get(&self, _key: &CacheKey) -> Option<Arc<DistanceResult>> {
        None
    }

    fn set(&self, _key: CacheKey, _value: Arc<DistanceResult>, _ttl: Option<Duration>) {}

    fn contains(&self, _key: &CacheKey) -> bool {
        false
    }

    fn clear(&self) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}
