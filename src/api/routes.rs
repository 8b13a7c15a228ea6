//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    audit_handler, create_handler, delete_handler, get_handler, health_handler, list_handler,
    metrics_handler, search_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /products` - Create a product
/// - `GET /products` - List every product
/// - `GET /products/search` - Filtered search through the query cache
/// - `GET /products/:id` - Fetch one product
/// - `PATCH /products/:id` - Partially update a product
/// - `DELETE /products/:id` - Delete a product
/// - `GET /metrics` - Search and cache metrics
/// - `GET /audit` - Audit trail
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products", post(create_handler).get(list_handler))
        .route("/products/search", get(search_handler))
        .route(
            "/products/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .route("/metrics", get(metrics_handler))
        .route("/audit", get(audit_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
