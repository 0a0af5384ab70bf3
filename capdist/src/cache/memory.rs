//! In-memory result cache with TTL expiry and FIFO eviction.

use crate::cache::r#trait::Cache;
use crate::cache::{CacheConfig, CacheKey, CacheStats};
use crate::result::DistanceResult;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// Entry in the result cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<DistanceResult>,
    created_at: Instant,
    ttl: Duration,
    /// Insertion sequence number for FIFO eviction
    seq: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<CacheKey, CacheEntry>,
    /// Insertion order: seq to key, oldest first
    order: BTreeMap<u64, CacheKey>,
    next_seq: u64,
}

impl Entries {
    fn insert(&mut self, key: CacheKey, mut entry: CacheEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(entry.seq, key.clone());
        if let Some(previous) = self.map.insert(key, entry) {
            self.order.remove(&previous.seq);
        }
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = self.map.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }

    /// Remove every expired entry, returning how many were removed.
    fn reap(&mut self, now: Instant) -> usize {
        let before = self.map.len();
        let order = &mut self.order;
        self.map.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                order.remove(&entry.seq);
            }
            keep
        });
        before - self.map.len()
    }

    /// Remove the entry with the oldest insertion.
    fn evict_oldest(&mut self) -> Option<CacheKey> {
        let (_, oldest) = self.order.pop_first()?;
        self.map.remove(&oldest);
        Some(oldest)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn keys_in_insertion_order(&self) -> Vec<String> {
        self.order.values().map(CacheKey::to_string).collect()
    }
}

/// Bounded result cache shared by all computation requests.
///
/// Expiry is lazy: `get` drops an expired entry when it finds one, and
/// `set`/`stats` sweep every expired entry first. When a new key arrives
/// at a full cache, the entry inserted earliest is evicted (FIFO, lookups
/// do not refresh position). Overwriting an existing key re-inserts it.
///
/// All operations take a single mutex; none of them hold it across an
/// await point.
pub struct ResultCache {
    entries: Mutex<Entries>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

impl ResultCache {
    /// Create a cache. A `max_entries` of 0 is raised to 1.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            config: CacheConfig {
                max_entries: config.max_entries.max(1),
                ..config
            },
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    /// Number of stored entries, including any not yet reaped.
    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_expired(&self, count: usize) {
        if count > 0 {
            self.expirations.fetch_add(count as u64, Ordering::Relaxed);
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl Cache for ResultCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<DistanceResult>> {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        match entries.map.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.value))
            }
            Some(_) => {
                entries.remove(key);
                self.record_expired(1);
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, "Cache entry expired");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: CacheKey, value: Arc<DistanceResult>, ttl: Option<Duration>) {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        let expired = entries.reap(now);
        self.record_expired(expired);

        if !entries.map.contains_key(&key) && entries.map.len() >= self.config.max_entries {
            if let Some(evicted) = entries.evict_oldest() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                trace!(key = %evicted, "Evicted oldest cache entry");
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                created_at: now,
                ttl: ttl.unwrap_or(self.config.default_ttl),
                seq: 0,
            },
        );
    }

    fn contains(&self, key: &CacheKey) -> bool {
        let entries = self.entries.lock();
        entries
            .map
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn stats(&self) -> CacheStats {
        let mut entries = self.entries.lock();
        let expired = entries.reap(Instant::now());
        self.record_expired(expired);

        CacheStats {
            size: entries.map.len(),
            max_size: self.config.max_entries,
            keys: entries.keys_in_insertion_order(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
        }
    }
}
