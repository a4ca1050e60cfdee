//! Domain service: identity/existence rules and transaction boundaries.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::{ProductError, Result};
use crate::models::{Page, PageRequest, Product, ProductUpdate};
use crate::service::ProductService;
use crate::storage::ProductRepository;

/// Product operations directly over a storage gateway.
///
/// Each write runs in one storage transaction that is committed only when
/// every step succeeded.
#[derive(Clone)]
pub struct ProductDomainService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductDomainService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductService for ProductDomainService {
    async fn create(&self, product: Product) -> Result<Product> {
        if let Some(id) = product.id {
            info!("Product id must be absent on create - got {}", id);
            return Err(ProductError::BadRequest(
                "product id must not be set on create".to_string(),
            ));
        }

        let mut tx = self.repository.begin().await?;
        let saved = tx.save(product).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, update: ProductUpdate) -> Result<Product> {
        let id = update
            .id
            .ok_or_else(|| ProductError::NotFound("product id is required".to_string()))?;

        let mut tx = self.repository.begin().await?;
        let stored = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))?;

        let saved = tx.save(update.apply_to(stored)).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        self.repository.find_all(page).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.repository.begin().await?;
        if !tx.exists_by_id(id).await? {
            return Err(ProductError::not_found(id));
        }

        tx.delete_by_id(id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.repository.find_all_by_category(category).await
    }
}
