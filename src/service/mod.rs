//! Service Module
//!
//! The catalog service layer plus the usage metrics and audit trail it keeps.

mod audit;
mod catalog_service;
mod metrics;

pub use audit::{AuditAction, AuditEntry, AuditLog};
pub use catalog_service::{CatalogMetrics, CatalogService};
pub use metrics::{SearchMetrics, SearchMetricsSnapshot};
