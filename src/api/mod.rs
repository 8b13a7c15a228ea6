//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `POST /products`, `GET /products`
//! - `GET /products/search`
//! - `GET|PATCH|DELETE /products/:id`
//! - `GET /metrics`, `GET /audit`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
