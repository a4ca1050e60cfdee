//! API Module
//!
//! HTTP handlers and routing for the product REST API.
//!
//! # Endpoints
//! - `GET /products` - Paginated product list
//! - `POST /products` - Create a product
//! - `GET|PUT|DELETE /products/:id` - Read, update or delete one product
//! - `GET /products/category/:category` - Products in a category
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
