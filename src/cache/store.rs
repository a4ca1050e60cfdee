//! Product Cache Module
//!
//! The process-wide product cache: a "product" namespace keyed by id and a
//! "products" namespace keyed by category.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::cache::{CacheNamespace, ProductCacheStats, PRODUCTS_NAMESPACE, PRODUCT_NAMESPACE};
use crate::models::Product;

// == Product Cache ==
/// Both product namespaces plus the sweep counter.
///
/// Constructed once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct ProductCache {
    /// Single-item lookups; `None` caches a known absence
    product: CacheNamespace<i64, Option<Product>>,
    /// Category list lookups
    products: CacheNamespace<String, Vec<Product>>,
    enabled: bool,
    sweeps: AtomicU64,
}

impl ProductCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            product: CacheNamespace::new(PRODUCT_NAMESPACE, enabled),
            products: CacheNamespace::new(PRODUCTS_NAMESPACE, enabled),
            enabled,
            sweeps: AtomicU64::new(0),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn product(&self) -> &CacheNamespace<i64, Option<Product>> {
        &self.product
    }

    pub fn products(&self) -> &CacheNamespace<String, Vec<Product>> {
        &self.products
    }

    // == Sweep ==
    /// Clears both namespaces. Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        if let Some(age) = self.product.oldest_entry_age_ms().await {
            debug!(namespace = PRODUCT_NAMESPACE, oldest_ms = age, "sweeping");
        }
        if let Some(age) = self.products.oldest_entry_age_ms().await {
            debug!(namespace = PRODUCTS_NAMESPACE, oldest_ms = age, "sweeping");
        }

        let removed = self.product.evict_all().await + self.products.evict_all().await;
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        removed
    }

    pub async fn stats(&self) -> ProductCacheStats {
        ProductCacheStats {
            enabled: self.enabled,
            sweeps: self.sweeps.load(Ordering::Relaxed),
            product: self.product.stats().await,
            products: self.products.stats().await,
        }
    }
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new(true)
    }
}
