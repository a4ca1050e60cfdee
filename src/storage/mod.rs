//! Storage Gateway Module
//!
//! The persistence seam for products. Reads go straight to the repository;
//! mutations go through a [`ProductTransaction`] so that a read-check-write
//! sequence commits or rolls back as one unit.

mod memory;
mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::models::{Page, PageRequest, Product};

pub use memory::InMemoryProductRepository;
pub use sqlite::SqliteProductRepository;

// == Repository ==
/// Product storage gateway.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Opens a transaction for a unit of mutations.
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>>;

    /// Finds a product by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Returns one page of all products ordered by id, plus the total count.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>>;

    /// Returns every product whose category equals `category` exactly.
    async fn find_all_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Checks whether a product with this id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
}

// == Transaction ==
/// A unit of work against the store. Dropping it without [`commit`] discards
/// every change made through it.
///
/// [`commit`]: ProductTransaction::commit
#[async_trait]
pub trait ProductTransaction: Send {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Product>>;

    async fn exists_by_id(&mut self, id: i64) -> Result<bool>;

    /// Inserts a product without an id, or updates the stored one by id.
    ///
    /// Inserts assign id, `created_date` and `last_updated_date`. Updates keep
    /// id and `created_date` and move `last_updated_date` forward.
    async fn save(&mut self, product: Product) -> Result<Product>;

    async fn delete_by_id(&mut self, id: i64) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Next audit timestamp, strictly after `previous` when given.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if now <= previous => previous + Duration::microseconds(1),
        _ => now,
    }
}
