//! Call-counting repository wrapper for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Page, PageRequest, Product};
use crate::storage::{InMemoryProductRepository, ProductRepository, ProductTransaction};

#[derive(Debug, Default)]
pub struct CallCounts {
    pub begin: AtomicUsize,
    pub find_by_id: AtomicUsize,
    pub find_all: AtomicUsize,
    pub find_all_by_category: AtomicUsize,
    pub exists_by_id: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Total calls of any kind.
    pub fn total(&self) -> usize {
        [
            &self.begin,
            &self.find_by_id,
            &self.find_all,
            &self.find_all_by_category,
            &self.exists_by_id,
        ]
        .iter()
        .map(|c| Self::get(c))
        .sum()
    }
}

/// Forwards to an in-memory repository and counts every top-level call.
#[derive(Debug, Clone, Default)]
pub struct CountingRepository {
    pub inner: InMemoryProductRepository,
    pub calls: Arc<CallCounts>,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for CountingRepository {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>> {
        self.calls.begin.fetch_add(1, Ordering::SeqCst);
        self.inner.begin().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.calls.find_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        self.calls.find_all.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all(page).await
    }

    async fn find_all_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.calls.find_all_by_category.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all_by_category(category).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        self.calls.exists_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.exists_by_id(id).await
    }
}
