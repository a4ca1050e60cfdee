//! API Routes
//!
//! Configures the Axum router with all product service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_product_handler, delete_product_handler, get_product_handler, health_handler,
    list_products_handler, products_by_category_handler, stats_handler, update_product_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products?page=&size=` - Paginated product list
/// - `POST /products` - Create a product
/// - `GET /products/:id` - Fetch one product
/// - `PUT /products/:id` - Update a product
/// - `DELETE /products/:id` - Delete a product
/// - `GET /products/category/:category` - Products in a category
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests and responses
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/products/category/:category",
            get(products_by_category_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
