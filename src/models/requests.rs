//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{PageRequest, Product, ProductUpdate};

/// Request body for POST /products
///
/// Carries no `id`; one sent by the client is ignored, so the service's
/// rejection of a preset id only applies to direct callers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: i32,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name is mandatory".to_string());
        }
        if self.price < Decimal::ZERO {
            return Some("Price must be non-negative".to_string());
        }
        if self.stock < 0 {
            return Some("Stock must be non-negative".to_string());
        }
        None
    }

    pub fn into_product(self) -> Product {
        Product {
            description: self.description,
            category: self.category,
            ..Product::new(self.name, self.price, self.stock)
        }
    }
}

/// Request body for PUT /products/:id
///
/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Option<String> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Some("Name must not be blank".to_string());
        }
        if matches!(self.price, Some(price) if price < Decimal::ZERO) {
            return Some("Price must be non-negative".to_string());
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Some("Stock must be non-negative".to_string());
        }
        None
    }

    /// Builds the patch for the product addressed by the request path.
    pub fn into_update(self, id: i64) -> ProductUpdate {
        ProductUpdate {
            id: Some(id),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
        }
    }
}

/// Query string for GET /products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl PageQuery {
    /// Resolves the query against the configured default page size.
    pub fn to_page_request(&self, default_size: usize) -> Result<PageRequest, String> {
        let size = self.size.unwrap_or(default_size);
        if size == 0 {
            return Err("Page size must be greater than zero".to_string());
        }
        let page = self.page.unwrap_or(0);

        // Offsets are bound as i64 by the SQL backend
        let limit = i64::MAX as usize;
        match page.checked_mul(size) {
            Some(offset) if offset <= limit && size <= limit => Ok(PageRequest::new(page, size)),
            _ => Err(format!("Page {} of size {} is out of range", page, size)),
        }
    }
}
