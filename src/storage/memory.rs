//! In-memory storage gateway.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

use crate::error::{ProductError, Result};
use crate::models::{Page, PageRequest, Product};
use crate::storage::{next_timestamp, ProductRepository, ProductTransaction};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Product>,
    /// Last assigned id; ids are never reused
    last_id: i64,
}

impl MemoryState {
    fn save(&mut self, mut product: Product) -> Result<Product> {
        let id = match product.id {
            None => {
                self.last_id += 1;
                let now = next_timestamp(None);
                product.id = Some(self.last_id);
                product.created_date = Some(now);
                product.last_updated_date = Some(now);
                self.last_id
            }
            Some(id) => {
                let stored = self.rows.get(&id).ok_or_else(|| {
                    ProductError::Storage(format!("cannot update missing product {}", id))
                })?;
                product.created_date = stored.created_date;
                product.last_updated_date = Some(next_timestamp(stored.last_updated_date));
                id
            }
        };

        self.rows.insert(id, product.clone());
        Ok(product)
    }
}

// == In-Memory Repository ==
/// Product storage held in process memory.
///
/// A transaction holds the write lock until it is committed or dropped, so
/// mutations are fully serialized.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>> {
        let guard = self.state.clone().write_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        debug!("Finding product by id: {}", id);
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        debug!("Finding all products, page: {}, size: {}", page.page, page.size);
        let state = self.state.read().await;
        let content = state
            .rows
            .values()
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect();
        Ok(Page::new(content, page, state.rows.len() as u64))
    }

    async fn find_all_by_category(&self, category: &str) -> Result<Vec<Product>> {
        debug!("Finding products by category: {}", category);
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|p| p.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.state.read().await.rows.contains_key(&id))
    }
}

// == Transaction ==
struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl ProductTransaction for MemoryTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Product>> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    async fn exists_by_id(&mut self, id: i64) -> Result<bool> {
        Ok(self.staged.rows.contains_key(&id))
    }

    async fn save(&mut self, product: Product) -> Result<Product> {
        self.staged.save(product)
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.staged.rows.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
