//! Read-through caching and write invalidation around a product service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::ProductCache;
use crate::error::Result;
use crate::models::{Page, PageRequest, Product, ProductUpdate};
use crate::service::ProductService;

/// Serves `find_by_id` and `find_by_category` from the cache and evicts
/// affected entries once a write has committed.
///
/// Nothing is evicted when the inner write fails.
pub struct CachingProductService<S> {
    inner: S,
    cache: Arc<ProductCache>,
}

impl<S: ProductService> CachingProductService<S> {
    pub fn new(inner: S, cache: Arc<ProductCache>) -> Self {
        Self { inner, cache }
    }

    async fn evict_category(&self, category: Option<&str>) {
        if let Some(category) = category {
            self.cache.products().evict(&category.to_string()).await;
        }
    }
}

#[async_trait]
impl<S: ProductService> ProductService for CachingProductService<S> {
    async fn create(&self, product: Product) -> Result<Product> {
        let saved = self.inner.create(product).await?;
        self.evict_category(saved.category.as_deref()).await;
        Ok(saved)
    }

    async fn update(&self, update: ProductUpdate) -> Result<Product> {
        let moves_category = update.category.is_some();
        let saved = self.inner.update(update).await?;

        if let Some(id) = saved.id {
            self.cache.product().evict(&id).await;
        }
        if moves_category {
            // The old category is unknown here; drop every list
            let removed = self.cache.products().evict_all().await;
            debug!(removed, "category changed, cleared category lists");
        } else {
            self.evict_category(saved.category.as_deref()).await;
        }
        Ok(saved)
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        self.inner.find_all(page).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.cache
            .product()
            .get_or_compute(id, || self.inner.find_by_id(id))
            .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.delete(id).await?;
        self.cache.product().evict(&id).await;
        // The deleted row's category is gone with it
        self.cache.products().evict_all().await;
        Ok(())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.cache
            .products()
            .get_or_compute(category.to_string(), || self.inner.find_by_category(category))
            .await
    }
}
