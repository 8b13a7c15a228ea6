//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::catalog::Product;

/// Response body for GET /products and GET /products/search
#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub count: usize,
    pub products: Vec<Product>,
}

impl ProductListResponse {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            count: products.len(),
            products,
        }
    }
}

/// Response body for PATCH and DELETE on /products/:id
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub message: String,
    pub id: u64,
}

impl MutationResponse {
    pub fn updated(id: u64) -> Self {
        Self {
            message: format!("Product {} updated successfully", id),
            id,
        }
    }

    pub fn deleted(id: u64) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
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
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
