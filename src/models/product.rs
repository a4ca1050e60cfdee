//! Product entity and the partial-update patch applied on `update`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// == Product ==
/// A product record.
///
/// `id`, `created_date` and `last_updated_date` are `None` until the product
/// has been persisted by a storage gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub stock: i32,
    pub created_date: Option<DateTime<Utc>>,
    pub last_updated_date: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a transient (never persisted) product.
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
            category: None,
            stock,
            created_date: None,
            last_updated_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// == Product Update ==
/// Changes for an existing product. Every `None` field is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    /// Target product; an update without an id can never match
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<i32>,
}

impl ProductUpdate {
    pub fn for_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    // == Merge ==
    /// Applies the set fields of this patch onto a stored product.
    ///
    /// Identity and audit timestamps always come from `stored`.
    pub fn apply_to(&self, stored: Product) -> Product {
        let Product {
            id,
            name,
            description,
            price,
            category,
            stock,
            created_date,
            last_updated_date,
        } = stored;

        Product {
            id,
            name: self.name.clone().unwrap_or(name),
            description: self.description.clone().or(description),
            price: self.price.unwrap_or(price),
            category: self.category.clone().or(category),
            stock: self.stock.unwrap_or(stock),
            created_date,
            last_updated_date,
        }
    }
}
