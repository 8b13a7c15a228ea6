//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{CatalogError, Result};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached search results
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// JSON snapshot file used to seed and drain the store
    pub snapshot_path: PathBuf,
    /// Periodic snapshot interval in seconds, 0 = only on shutdown
    pub snapshot_interval: u64,
    /// Maximum number of audit entries retained in memory
    pub audit_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Query cache entries (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SNAPSHOT_PATH` - Snapshot file (default: products.json)
    /// - `SNAPSHOT_INTERVAL` - Autosave frequency in seconds (default: 0, disabled)
    /// - `AUDIT_CAPACITY` - Retained audit entries (default: 10000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            snapshot_interval: parse_var("SNAPSHOT_INTERVAL")
                .unwrap_or(defaults.snapshot_interval),
            audit_capacity: parse_var("AUDIT_CAPACITY").unwrap_or(defaults.audit_capacity),
        }
    }

    /// Rejects settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(CatalogError::Configuration(
                "CACHE_CAPACITY must be a positive integer".to_string(),
            ));
        }
        if self.audit_capacity == 0 {
            return Err(CatalogError::Configuration(
                "AUDIT_CAPACITY must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 100,
            server_port: 3000,
            snapshot_path: PathBuf::from("products.json"),
            snapshot_interval: 0,
            audit_capacity: 10_000,
        }
    }
}
