//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Malformed product or search input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No product with the given id (HTTP layer only; the core returns Option/bool)
    #[error("Product not found: {0}")]
    NotFound(u64),

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Programming error at a component boundary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Snapshot load/save failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::Validation(_) | CatalogError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Configuration(_)
            | CatalogError::Persistence(_)
            | CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;
