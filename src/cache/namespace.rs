//! Cache Namespace Module
//!
//! One independent key space of the product cache.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

#[derive(Debug)]
struct NamespaceInner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
    /// Bumped by every eviction
    generation: u64,
    /// Generation of the last `evict_all`
    cleared_at: u64,
    /// Generation of the last single-key eviction, per key; reset by `evict_all`
    evicted_at: HashMap<K, u64>,
}

impl<K: Eq + Hash, V> NamespaceInner<K, V> {
    /// True when `key` was evicted after `generation` was observed.
    fn evicted_since(&self, key: &K, generation: u64) -> bool {
        self.cleared_at > generation
            || self
                .evicted_at
                .get(key)
                .is_some_and(|&evicted| evicted > generation)
    }
}

// == Cache Namespace ==
/// Thread-safe key/value store with get-or-compute and explicit eviction.
///
/// A disabled namespace stores nothing and answers every lookup with a miss.
#[derive(Debug)]
pub struct CacheNamespace<K, V> {
    name: &'static str,
    enabled: bool,
    inner: RwLock<NamespaceInner<K, V>>,
}

impl<K, V> CacheNamespace<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(name: &'static str, enabled: bool) -> Self {
        Self {
            name,
            enabled,
            inner: RwLock::new(NamespaceInner {
                entries: HashMap::new(),
                stats: CacheStats::default(),
                generation: 0,
                cleared_at: 0,
                evicted_at: HashMap::new(),
            }),
        }
    }

    // == Lookup ==
    /// Returns the cached value, or the generation observed on a miss.
    async fn lookup(&self, key: &K) -> Result<V, u64> {
        // Write lock: hit/miss counters are updated on every lookup
        let mut inner = self.inner.write().await;
        if !self.enabled {
            inner.stats.record_miss();
            return Err(inner.generation);
        }

        match inner.entries.get(key).map(|entry| entry.value.clone()) {
            Some(value) => {
                inner.stats.record_hit();
                Ok(value)
            }
            None => {
                inner.stats.record_miss();
                Err(inner.generation)
            }
        }
    }

    /// Returns the cached value for `key`, if any.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.lookup(key).await.ok()
    }

    /// Stores a value unconditionally.
    pub async fn insert(&self, key: K, value: V) {
        if !self.enabled {
            return;
        }
        let mut inner = self.inner.write().await;
        inner.entries.insert(key, CacheEntry::new(value));
        inner.stats.total_entries = inner.entries.len();
    }

    // == Get Or Compute ==
    /// Returns the cached value, or runs `compute` and caches its success.
    ///
    /// No lock is held while `compute` runs. Concurrent misses for the same
    /// key may each compute; the last successful fill wins. A fill is
    /// discarded when its key was evicted, or the namespace cleared, while
    /// it was computing. Evicting other keys does not affect it.
    pub async fn get_or_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let generation = match self.lookup(&key).await {
            Ok(value) => {
                debug!(namespace = self.name, ?key, "cache hit");
                return Ok(value);
            }
            Err(generation) => generation,
        };

        debug!(namespace = self.name, ?key, "cache miss");
        let value = compute().await?;

        if self.enabled {
            let mut inner = self.inner.write().await;
            if !inner.evicted_since(&key, generation) {
                inner.entries.insert(key, CacheEntry::new(value.clone()));
                inner.stats.total_entries = inner.entries.len();
            } else {
                debug!(namespace = self.name, ?key, "discarding fill raced by eviction");
            }
        }

        Ok(value)
    }

    // == Evict ==
    /// Removes one entry. Returns true if it was present.
    pub async fn evict(&self, key: &K) -> bool {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let generation = inner.generation;
        inner.evicted_at.insert(key.clone(), generation);
        let removed = inner.entries.remove(key).is_some();
        if removed {
            inner.stats.record_evictions(1);
            inner.stats.total_entries = inner.entries.len();
        }
        removed
    }

    /// Removes every entry. Returns the number removed.
    pub async fn evict_all(&self) -> usize {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.cleared_at = inner.generation;
        inner.evicted_at.clear();
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.stats.record_evictions(removed);
        inner.stats.total_entries = 0;
        removed
    }

    pub async fn contains(&self, key: &K) -> bool {
        self.inner.read().await.entries.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Age of the longest-lived entry in milliseconds.
    pub async fn oldest_entry_age_ms(&self) -> Option<u64> {
        let inner = self.inner.read().await;
        inner.entries.values().map(CacheEntry::age_ms).max()
    }

    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }
}
