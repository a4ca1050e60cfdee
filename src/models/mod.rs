//! Domain types and the request/response models for the product API
//!
//! `product` and `page` hold the domain values passed between the service and
//! storage layers. `requests` and `responses` define the HTTP bodies.

pub mod page;
pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use page::{Page, PageRequest};
pub use product::{Product, ProductUpdate};
pub use requests::{CreateProductRequest, PageQuery, UpdateProductRequest};
pub use responses::{HealthResponse, NamespaceStatsResponse, ProductResponse, StatsResponse};
