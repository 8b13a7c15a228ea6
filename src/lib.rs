//! Product Catalog - An in-memory product catalog service
//!
//! Stores product records behind category, brand and price indexes and
//! memoizes filtered searches in a bounded LRU query cache.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::CatalogService;
pub use tasks::spawn_snapshot_task;
