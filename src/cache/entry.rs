//! Cache Entry Module
//!
//! A cached value together with the time it was stored. Entries carry no
//! expiry of their own; the sweep task clears them wholesale.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub cached_at: u64,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            cached_at: current_timestamp_ms(),
        }
    }

    /// Milliseconds since the entry was stored.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.cached_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
