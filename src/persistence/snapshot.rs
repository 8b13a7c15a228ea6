//! Snapshot File Module
//!
//! Reads and writes the full product list as a JSON array.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{Product, ProductStore};
use crate::error::{CatalogError, Result};

// == Snapshot File ==
/// JSON file holding every product, ascending by id.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Reads the snapshot; a missing file is an empty catalog.
    pub fn load(&self) -> Result<Vec<Product>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CatalogError::Persistence(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|e| {
            CatalogError::Persistence(format!(
                "Malformed snapshot {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Loads the snapshot straight into a seeded store.
    pub fn load_store(&self) -> Result<ProductStore> {
        let products = self.load()?;
        let count = products.len();
        let store = ProductStore::from_products(products)?;
        info!(
            "Loaded {} products from {} (next id {})",
            count,
            self.path.display(),
            store.next_id()
        );
        Ok(store)
    }

    // == Save ==
    /// Writes the snapshot through a temp file renamed over the target.
    pub fn save(&self, products: &[Product]) -> Result<()> {
        let json = serde_json::to_string_pretty(products)
            .map_err(|e| CatalogError::Persistence(format!("Failed to encode snapshot: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                CatalogError::Persistence(format!(
                    "Failed to write {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        debug!("Saved {} products to {}", products.len(), self.path.display());
        Ok(())
    }
}
