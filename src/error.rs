//! Error types for the product service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Product Error Enum ==
/// Unified error type for the product service.
#[derive(Error, Debug)]
pub enum ProductError {
    /// Caller supplied something the operation forbids (an id on create)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Referenced product does not exist
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Request body failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Relational store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage layer failure outside the database driver
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ProductError {
    /// Builds the `NotFound` error for a product id.
    pub fn not_found(id: i64) -> Self {
        ProductError::NotFound(format!("no product with id {}", id))
    }
}

/// Malformed or incomplete request bodies get the same 400 envelope as
/// failed validation.
impl From<JsonRejection> for ProductError {
    fn from(rejection: JsonRejection) -> Self {
        ProductError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProductError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProductError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProductError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product service.
pub type Result<T> = std::result::Result<T, ProductError>;
