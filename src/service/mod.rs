//! Product Service Module
//!
//! The product operations and the layers composed around them:
//!
//! - [`ProductDomainService`] enforces identity and existence rules and owns
//!   the transaction boundaries.
//! - [`CachingProductService`] serves reads from the [`ProductCache`] and
//!   invalidates it after successful writes.
//! - [`LoggingProductService`] logs every call with its outcome and duration.
//!
//! [`ProductCache`]: crate::cache::ProductCache

mod caching;
mod domain;
mod logging;

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::ProductCache;
use crate::error::Result;
use crate::models::{Page, PageRequest, Product, ProductUpdate};
use crate::storage::ProductRepository;

pub use caching::CachingProductService;
pub use domain::ProductDomainService;
pub use logging::LoggingProductService;

// == Product Service ==
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Persists a new product. Fails with `BadRequest` when `product.id` is set.
    async fn create(&self, product: Product) -> Result<Product>;

    /// Merges the set fields of `update` onto the stored product.
    /// Fails with `NotFound` when the id is missing or unknown.
    async fn update(&self, update: ProductUpdate) -> Result<Product>;

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Removes a product. Fails with `NotFound` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<()>;

    /// All products whose category equals `category` exactly.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>>;
}

/// Builds the standard service stack: logging over caching over the domain service.
pub fn compose(
    repository: Arc<dyn ProductRepository>,
    cache: Arc<ProductCache>,
) -> Arc<dyn ProductService> {
    let domain = ProductDomainService::new(repository);
    let cached = CachingProductService::new(domain, cache);
    Arc::new(LoggingProductService::new(cached))
}
