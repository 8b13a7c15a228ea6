//! Catalog Service Module
//!
//! Routes searches through the query cache and mutations through the store,
//! invalidating the cache after every committed change.

use std::time::Instant;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::cache::{CacheStats, QueryCache};
use crate::catalog::{NewProduct, Product, ProductPatch, ProductStore, SearchQuery};
use crate::config::Config;
use crate::error::Result;
use crate::service::{AuditAction, AuditEntry, AuditLog, SearchMetrics, SearchMetricsSnapshot};

// == Catalog Metrics ==
/// Usage metrics exposed by the service.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogMetrics {
    pub search: SearchMetricsSnapshot,
    pub cache: CacheStats,
    pub cache_hit_rate: f64,
    pub product_count: usize,
}

// == Catalog Service ==
/// Owns the store and its query cache.
///
/// The store is a single exclusion domain: mutations hold the write lock for
/// the whole remove-then-reinsert sequence, so readers only ever observe the
/// state before or after a mutation.
#[derive(Debug)]
pub struct CatalogService {
    store: RwLock<ProductStore>,
    cache: Mutex<QueryCache>,
    metrics: Mutex<SearchMetrics>,
    audit: Mutex<AuditLog>,
}

impl CatalogService {
    // == Constructor ==
    pub fn new(store: ProductStore, cache: QueryCache, audit: AuditLog) -> Self {
        Self {
            store: RwLock::new(store),
            cache: Mutex::new(cache),
            metrics: Mutex::new(SearchMetrics::new()),
            audit: Mutex::new(audit),
        }
    }

    /// Builds the service around a seeded store using configured capacities.
    pub fn from_config(config: &Config, store: ProductStore) -> Result<Self> {
        config.validate()?;
        let cache = QueryCache::new(config.cache_capacity)?;
        Ok(Self::new(store, cache, AuditLog::new(config.audit_capacity)))
    }

    // == Create ==
    pub async fn create_product(&self, username: &str, input: NewProduct) -> Result<Product> {
        let product = {
            let mut store = self.store.write().await;
            store.create(input).inspect_err(|e| warn!("Rejected product create: {}", e))?
        };
        self.invalidate_cache().await;

        info!("Created product {} ({})", product.id, product.name);
        self.audit.lock().await.record(
            username,
            AuditAction::AddProduct,
            format!("id={} name={}", product.id, product.name),
        );
        Ok(product)
    }

    // == Update ==
    /// Returns `Ok(false)` when the product does not exist.
    pub async fn update_product(
        &self,
        username: &str,
        id: u64,
        patch: ProductPatch,
    ) -> Result<bool> {
        let updated = {
            let mut store = self.store.write().await;
            store
                .update(id, patch)
                .inspect_err(|e| warn!("Rejected update of product {}: {}", id, e))?
        };
        if !updated {
            return Ok(false);
        }
        self.invalidate_cache().await;

        info!("Updated product {}", id);
        self.audit
            .lock()
            .await
            .record(username, AuditAction::UpdateProduct, format!("id={}", id));
        Ok(true)
    }

    // == Delete ==
    pub async fn delete_product(&self, username: &str, id: u64) -> bool {
        let deleted = self.store.write().await.delete(id);
        if !deleted {
            return false;
        }
        self.invalidate_cache().await;

        info!("Deleted product {}", id);
        self.audit
            .lock()
            .await
            .record(username, AuditAction::DeleteProduct, format!("id={}", id));
        true
    }

    // == Reads ==
    pub async fn get_product(&self, id: u64) -> Option<Product> {
        self.store.read().await.get(id)
    }

    /// Every product ascending by id; also the shutdown snapshot.
    pub async fn all_products(&self) -> Vec<Product> {
        self.store.read().await.find_all()
    }

    pub async fn product_count(&self) -> usize {
        self.store.read().await.count()
    }

    // == Search ==
    /// Answers from the cache when possible, otherwise from the store.
    ///
    /// The cache generation is read before the store so a result computed
    /// against pre-mutation state is never cached after the invalidation.
    pub async fn search_products(
        &self,
        username: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Product>> {
        query.validate()?;
        let started = Instant::now();
        let key = query.cache_key();

        let generation = {
            let mut cache = self.cache.lock().await;
            if let Some(hit) = cache.get(&key) {
                drop(cache);
                self.metrics.lock().await.record_search(started.elapsed());
                self.audit
                    .lock()
                    .await
                    .record(username, AuditAction::SearchCacheHit, key);
                return Ok(hit);
            }
            cache.generation()
        };

        let results = self.store.read().await.search(query);

        self.cache
            .lock()
            .await
            .put_if_generation(generation, &key, &results)?;

        self.metrics.lock().await.record_search(started.elapsed());
        self.audit.lock().await.record(
            username,
            AuditAction::Search,
            format!("{} -> {} results", key, results.len()),
        );
        Ok(results)
    }

    // == Cache ==
    /// Clears every cached search result.
    pub async fn invalidate_cache(&self) {
        self.cache.lock().await.invalidate_all();
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.lock().await.len()
    }

    // == Metrics & Audit ==
    pub async fn metrics(&self) -> CatalogMetrics {
        let search = self.metrics.lock().await.snapshot();
        let cache = self.cache.lock().await.stats();
        let product_count = self.product_count().await;
        CatalogMetrics {
            search,
            cache_hit_rate: cache.hit_rate(),
            cache,
            product_count,
        }
    }

    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().await.entries()
    }
}
