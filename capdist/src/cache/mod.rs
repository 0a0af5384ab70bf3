//! Time-bounded cache of computed distance results.
//!
//! Results are keyed by the canonical code set of a request, expire after a
//! per-entry TTL and are evicted oldest-insertion-first once the cache is
//! full.

mod memory;
mod stats;
mod r#trait;
mod types;

pub use memory::ResultCache;
pub use r#trait::{Cache, NoOpCache};
pub use stats::CacheStats;
pub use types::{CacheConfig, CacheKey, CACHE_KEY_PREFIX, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
