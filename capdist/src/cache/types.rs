//! Core types for the result cache.

use crate::request::ComputationRequest;
use std::fmt;
use std::time::Duration;

/// Prefix of every result cache key.
pub const CACHE_KEY_PREFIX: &str = "distances:";

/// Default maximum number of cached results.
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Default lifetime of a cached result (10 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Canonical key of a computation.
///
/// Built from the sorted, de-duplicated code set so the same codes map to
/// the same key regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a validated request.
    pub fn for_request(request: &ComputationRequest) -> Self {
        Self::from_sorted(&request.canonical_codes())
    }

    /// Key for an arbitrary code list; codes are normalized, sorted and
    /// de-duplicated first.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut normalized: Vec<String> = codes
            .iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();
        Self::from_sorted(&normalized)
    }

    fn from_sorted<S: AsRef<str>>(codes: &[S]) -> Self {
        let joined = codes
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        Self(format!("{CACHE_KEY_PREFIX}{joined}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries (default: 200)
    pub max_entries: usize,
    /// TTL applied when `set` is called without one (default: 10 minutes)
    pub default_ttl: Duration,
    /// When false the service uses a no-op cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl: DEFAULT_TTL,
            enabled: true,
        }
    }
}
