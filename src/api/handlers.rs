//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::catalog::{Product, ProductStore, SearchQuery};
use crate::error::{CatalogError, Result};
use crate::models::{
    CreateProductRequest, HealthResponse, MutationResponse, ProductListResponse,
    UpdateProductRequest,
};
use crate::service::{AuditEntry, CatalogMetrics, CatalogService};

/// Header naming the acting user for the audit trail.
pub const USERNAME_HEADER: &str = "x-username";

const ANONYMOUS: &str = "anonymous";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The catalog service; it synchronizes internally
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Wraps an already constructed service.
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Builds the service from configuration around a seeded store.
    pub fn from_config(config: &crate::config::Config, store: ProductStore) -> Result<Self> {
        Ok(Self::new(CatalogService::from_config(config, store)?))
    }
}

fn username(headers: &HeaderMap) -> &str {
    headers
        .get(USERNAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS)
}

/// Handler for POST /products
pub async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state
        .catalog
        .create_product(username(&headers), req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products
pub async fn list_handler(State(state): State<AppState>) -> Json<ProductListResponse> {
    Json(ProductListResponse::new(state.catalog.all_products().await))
}

/// Handler for GET /products/search
pub async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ProductListResponse>> {
    let products = state
        .catalog
        .search_products(username(&headers), &query)
        .await?;

    Ok(Json(ProductListResponse::new(products)))
}

/// Handler for GET /products/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>> {
    state
        .catalog
        .get_product(id)
        .await
        .map(Json)
        .ok_or(CatalogError::NotFound(id))
}

/// Handler for PATCH /products/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<MutationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::Validation(error_msg));
    }

    if state
        .catalog
        .update_product(username(&headers), id, req.into())
        .await?
    {
        Ok(Json(MutationResponse::updated(id)))
    } else {
        Err(CatalogError::NotFound(id))
    }
}

/// Handler for DELETE /products/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<MutationResponse>> {
    if state.catalog.delete_product(username(&headers), id).await {
        Ok(Json(MutationResponse::deleted(id)))
    } else {
        Err(CatalogError::NotFound(id))
    }
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CatalogMetrics> {
    Json(state.catalog.metrics().await)
}

/// Handler for GET /audit
pub async fn audit_handler(State(state): State<AppState>) -> Json<Vec<AuditEntry>> {
    Json(state.catalog.audit_entries().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
