//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::ProductCacheStats;
use crate::models::Product;

/// A stored product as returned by every product endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub stock: i32,
    pub created_date: Option<DateTime<Utc>>,
    pub last_updated_date: Option<DateTime<Utc>>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            created_date: product.created_date,
            last_updated_date: product.last_updated_date,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub enabled: bool,
    pub sweeps: u64,
    pub product: NamespaceStatsResponse,
    pub products: NamespaceStatsResponse,
}

/// Counters for one cache namespace
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<ProductCacheStats> for StatsResponse {
    fn from(stats: ProductCacheStats) -> Self {
        let namespace = |s: crate::cache::CacheStats| NamespaceStatsResponse {
            hit_rate: s.hit_rate(),
            hits: s.hits,
            misses: s.misses,
            evictions: s.evictions,
            total_entries: s.total_entries,
        };

        Self {
            enabled: stats.enabled,
            sweeps: stats.sweeps,
            product: namespace(stats.product),
            products: namespace(stats.products),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
