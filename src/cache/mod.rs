//! Cache Module
//!
//! Provides the in-memory product cache: two namespaces with explicit
//! invalidation and a periodic full sweep.

mod entry;
mod namespace;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use namespace::CacheNamespace;
pub use stats::{CacheStats, ProductCacheStats};
pub use store::ProductCache;

// == Public Constants ==
/// Namespace for single-product lookups keyed by id
pub const PRODUCT_NAMESPACE: &str = "product";

/// Namespace for category list lookups keyed by category
pub const PRODUCTS_NAMESPACE: &str = "products";

/// Default interval between full sweeps in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 600;
