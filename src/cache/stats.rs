//! Cache Statistics Module
//!
//! Per-namespace hit/miss/eviction counters.

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to storage
    pub misses: u64,
    /// Entries removed by invalidation or sweep
    pub evictions: u64,
    /// Current number of entries in the namespace
    pub total_entries: usize,
}

impl CacheStats {
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }
}

/// Snapshot of both product namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCacheStats {
    pub enabled: bool,
    /// Completed full sweeps
    pub sweeps: u64,
    pub product: CacheStats,
    pub products: CacheStats,
}
