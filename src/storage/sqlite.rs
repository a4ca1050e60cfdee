//! SQLite storage gateway backed by sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, FromRow, Transaction};
use tracing::{debug, info, warn};

use crate::error::{ProductError, Result};
use crate::models::{Page, PageRequest, Product};
use crate::storage::{next_timestamp, ProductRepository, ProductTransaction};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        name              TEXT    NOT NULL,
        description       TEXT,
        price             TEXT    NOT NULL,
        category          TEXT,
        stock             INTEGER NOT NULL,
        created_date      TEXT    NOT NULL,
        last_updated_date TEXT    NOT NULL
    )
"#;

const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products (category)";

const SELECT_BY_ID: &str = r#"
    SELECT id, name, description, price, category, stock, created_date, last_updated_date
    FROM products
    WHERE id = ?
"#;

const SELECT_PAGE: &str = r#"
    SELECT id, name, description, price, category, stock, created_date, last_updated_date
    FROM products
    ORDER BY id
    LIMIT ? OFFSET ?
"#;

const SELECT_BY_CATEGORY: &str = r#"
    SELECT id, name, description, price, category, stock, created_date, last_updated_date
    FROM products
    WHERE category = ?
    ORDER BY id
"#;

/// SQLite product repository.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Wraps an existing pool. The schema is not touched.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to `url` and creates the products table if needed.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to SQLite database...");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                ProductError::Database(e)
            })?;

        let repository = Self::new(pool);
        repository.init_schema().await?;
        info!("SQLite connection pool established");
        Ok(repository)
    }

    /// A private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let repository = Self::new(pool);
        repository.init_schema().await?;
        Ok(repository)
    }

    pub async fn init_schema(&self) -> Result<()> {
        self.pool.execute(CREATE_TABLE).await?;
        self.pool.execute(CREATE_CATEGORY_INDEX).await?;
        Ok(())
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: String,
    category: Option<String>,
    stock: i32,
    created_date: DateTime<Utc>,
    last_updated_date: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> std::result::Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price).map_err(|e| {
            ProductError::Storage(format!("Invalid price in database for {}: {}", row.id, e))
        })?;

        Ok(Product {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price,
            category: row.category,
            stock: row.stock,
            created_date: Some(row.created_date),
            last_updated_date: Some(row.last_updated_date),
        })
    }
}

async fn fetch_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Product>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ProductRow>(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    row.map(Product::try_from).transpose()
}

async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteTransaction { tx }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        debug!("Finding product by id: {}", id);
        fetch_by_id(&self.pool, id).await
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>> {
        debug!("Finding all products, page: {}, size: {}", page.page, page.size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ProductRow>(SELECT_PAGE)
            .bind(i64::try_from(page.size).unwrap_or(i64::MAX))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let content = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(content, page, total as u64))
    }

    async fn find_all_by_category(&self, category: &str) -> Result<Vec<Product>> {
        debug!("Finding products by category: {}", category);

        let rows = sqlx::query_as::<_, ProductRow>(SELECT_BY_CATEGORY)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        exists(&self.pool, id).await
    }
}

struct SqliteTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl ProductTransaction for SqliteTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Product>> {
        fetch_by_id(&mut *self.tx, id).await
    }

    async fn exists_by_id(&mut self, id: i64) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn save(&mut self, product: Product) -> Result<Product> {
        match product.id {
            None => {
                let now = next_timestamp(None);
                let result = sqlx::query(
                    r#"
                    INSERT INTO products
                        (name, description, price, category, stock, created_date, last_updated_date)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(product.name.clone())
                .bind(product.description.clone())
                .bind(product.price.to_string())
                .bind(product.category.clone())
                .bind(product.stock)
                .bind(now)
                .bind(now)
                .execute(&mut *self.tx)
                .await?;

                Ok(Product {
                    id: Some(result.last_insert_rowid()),
                    created_date: Some(now),
                    last_updated_date: Some(now),
                    ..product
                })
            }
            Some(id) => {
                let stored = fetch_by_id(&mut *self.tx, id).await?.ok_or_else(|| {
                    ProductError::Storage(format!("cannot update missing product {}", id))
                })?;
                let now = next_timestamp(stored.last_updated_date);

                sqlx::query(
                    r#"
                    UPDATE products
                    SET name = ?, description = ?, price = ?, category = ?, stock = ?,
                        last_updated_date = ?
                    WHERE id = ?
                    "#,
                )
                .bind(product.name.clone())
                .bind(product.description.clone())
                .bind(product.price.to_string())
                .bind(product.category.clone())
                .bind(product.stock)
                .bind(now)
                .bind(id)
                .execute(&mut *self.tx)
                .await?;

                Ok(Product {
                    created_date: stored.created_date,
                    last_updated_date: Some(now),
                    ..product
                })
            }
        }
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
