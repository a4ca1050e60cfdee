//! API Handlers
//!
//! HTTP request handlers for each product endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::ProductCache;
use crate::config::Config;
use crate::error::{ProductError, Result};
use crate::models::{
    CreateProductRequest, HealthResponse, Page, PageQuery, PageRequest, ProductResponse,
    StatsResponse, UpdateProductRequest,
};
use crate::service::{compose, ProductService};
use crate::storage::{InMemoryProductRepository, ProductRepository, SqliteProductRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fully composed product service
    pub service: Arc<dyn ProductService>,
    /// Cache the service reads through; shared with the sweep task
    pub cache: Arc<ProductCache>,
    /// Page size for list requests without `size`
    pub default_page_size: usize,
}

impl AppState {
    /// Creates a new AppState over the given repository and cache.
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<ProductCache>) -> Self {
        Self {
            service: compose(repository, cache.clone()),
            cache,
            default_page_size: PageRequest::DEFAULT_SIZE,
        }
    }

    /// In-memory storage with an enabled cache.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(ProductCache::new(true)),
        )
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects to SQLite when `database_url` is set.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let repository: Arc<dyn ProductRepository> = match &config.database_url {
            Some(url) => Arc::new(SqliteProductRepository::connect(url).await?),
            None => {
                info!("No DATABASE_URL configured, using in-memory storage");
                Arc::new(InMemoryProductRepository::new())
            }
        };

        let mut state = Self::new(repository, Arc::new(ProductCache::new(config.cache_enabled)));
        state.default_page_size = config.default_page_size;
        Ok(state)
    }
}

/// Handler for GET /products?page=&size=
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ProductResponse>>> {
    let page = query
        .to_page_request(state.default_page_size)
        .map_err(ProductError::InvalidRequest)?;

    let products = state.service.find_all(page).await?;
    Ok(Json(products.map(ProductResponse::from)))
}

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>> {
    let product = state
        .service
        .find_by_id(id)
        .await?
        .ok_or_else(|| ProductError::not_found(id))?;

    Ok(Json(product.into()))
}

/// Handler for POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ProductError::InvalidRequest(error_msg));
    }

    let created = state.service.create(req.into_product()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Handler for PUT /products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ProductError::InvalidRequest(error_msg));
    }

    let updated = state.service.update(req.into_update(id)).await?;
    Ok(Json(updated.into()))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /products/category/:category
pub async fn products_by_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = state.service.find_by_category(&category).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
