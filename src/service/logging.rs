//! Call logging around a product service.

use std::fmt::Debug;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::Result;
use crate::models::{Page, PageRequest, Product, ProductUpdate};
use crate::service::ProductService;

/// Logs each operation's input, outcome and elapsed time.
pub struct LoggingProductService<S> {
    inner: S,
}

impl<S: ProductService> LoggingProductService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn log_outcome<T: Debug>(operation: &'static str, started: Instant, result: &Result<T>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => info!(operation, elapsed_ms, "Completed - {:?}", value),
        Err(e) => error!(operation, elapsed_ms, "Failed with: {}", e),
    }
}

#[async_trait]
impl<S: ProductService> ProductService for LoggingProductService<S> {
    async fn create(&self, product: Product) -> Result<Product> {
        info!(operation = "create", "Start creating product - {:?}", product);
        let started = Instant::now();
        let result = self.inner.create(product).await;
        log_outcome("create", started, &result);
        result
    }

    async fn update(&self, update: ProductUpdate) -> Result<Product> {
        info!(operation = "update", "Start updating product - {:?}", update);
        let started = Instant::now();
        let result = self.inner.update(update).await;
        log_outcome("update", started, &result);
        result
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        info!(operation = "find_all", page = page.page, size = page.size, "Listing products");
        let started = Instant::now();
        let result = self.inner.find_all(page).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        // Page bodies can be large; log the counts only
        match &result {
            Ok(page) => info!(
                operation = "find_all",
                elapsed_ms,
                returned = page.content.len(),
                total = page.total_elements,
                "Completed"
            ),
            Err(e) => error!(operation = "find_all", elapsed_ms, "Failed with: {}", e),
        }
        result
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        info!(operation = "find_by_id", id, "Finding product");
        let started = Instant::now();
        let result = self.inner.find_by_id(id).await;
        log_outcome("find_by_id", started, &result);
        result
    }

    async fn delete(&self, id: i64) -> Result<()> {
        info!(operation = "delete", id, "Start deleting product");
        let started = Instant::now();
        let result = self.inner.delete(id).await;
        log_outcome("delete", started, &result);
        result
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        info!(operation = "find_by_category", category, "Finding products by category");
        let started = Instant::now();
        let result = self.inner.find_by_category(category).await;
        log_outcome("find_by_category", started, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::service::ProductDomainService;
    use crate::storage::InMemoryProductRepository;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn service() -> LoggingProductService<ProductDomainService> {
        LoggingProductService::new(ProductDomainService::new(Arc::new(
            InMemoryProductRepository::new(),
        )))
    }

    #[tokio::test]
    async fn test_results_pass_through_unchanged() {
        let service = service();
        let created = service
            .create(Product::new("Widget", Decimal::ONE, 1).with_category("tools"))
            .await
            .unwrap();
        let id = created.id.unwrap();

        assert_eq!(service.find_by_id(id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.find_by_category("tools").await.unwrap(), vec![created]);
        assert_eq!(service.find_all(PageRequest::default()).await.unwrap().total_elements, 1);
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let service = service();
        assert!(matches!(
            service.delete(1).await,
            Err(ProductError::NotFound(_))
        ));
        assert!(matches!(
            service.update(ProductUpdate::for_id(1)).await,
            Err(ProductError::NotFound(_))
        ));
    }
}
