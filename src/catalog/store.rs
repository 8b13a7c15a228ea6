//! Product Store Module
//!
//! Authoritative product table with category, brand and price indexes.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::catalog::product::normalize_price;
use crate::catalog::{Bucket, NewProduct, Product, ProductIndexes, ProductPatch, SearchQuery};
use crate::error::{CatalogError, Result};

// == Product Store ==
/// In-memory product table plus derived indexes.
///
/// Every mutation keeps the indexes in lockstep with `products`. The store is
/// not synchronized itself; the owner wraps it in a single lock.
#[derive(Debug)]
pub struct ProductStore {
    /// Primary storage by id
    products: HashMap<u64, Product>,
    /// Category, brand and price indexes
    indexes: ProductIndexes,
    /// Next id to hand out
    next_id: u64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    // == Constructor ==
    /// Creates an empty store whose first id will be 1.
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            indexes: ProductIndexes::new(),
            next_id: 1,
        }
    }

    /// Seeds a store from previously persisted products.
    ///
    /// Ids and timestamps are kept; the id generator resumes at `max(id) + 1`.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let mut store = Self::new();
        for mut product in products {
            product.validate()?;
            if store.products.contains_key(&product.id) {
                return Err(CatalogError::Validation(format!(
                    "Duplicate product id {} in seed data",
                    product.id
                )));
            }
            product.price = normalize_price(product.price);
            store.indexes.insert(&product);
            store.products.insert(product.id, product);
        }
        store.restore_id_generator()?;
        Ok(store)
    }

    /// Recomputes the id generator from the ids currently stored.
    ///
    /// Fails when the largest stored id leaves no room for another one.
    fn restore_id_generator(&mut self) -> Result<()> {
        let max_id = self.products.keys().copied().max().unwrap_or(0);
        let next = max_id.checked_add(1).ok_or_else(id_space_exhausted)?;
        self.next_id = self.next_id.max(next);
        Ok(())
    }

    // == Create ==
    /// Validates and stores a new product, returning the stored copy.
    pub fn create(&mut self, input: NewProduct) -> Result<Product> {
        input.validate()?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(id_space_exhausted)?;

        let now = Utc::now();
        let product = Product {
            id,
            name: input.name,
            category: input.category,
            brand: input.brand,
            price: normalize_price(input.price),
            description: input.description,
            created_at: now,
            updated_at: now,
        };

        self.indexes.insert(&product);
        self.products.insert(id, product.clone());
        Ok(product)
    }

    // == Update ==
    /// Applies a partial update.
    ///
    /// Returns `Ok(false)` if the id is unknown. Invalid supplied fields are
    /// rejected before anything changes.
    pub fn update(&mut self, id: u64, patch: ProductPatch) -> Result<bool> {
        patch.validate()?;

        let Some(product) = self.products.get_mut(&id) else {
            return Ok(false);
        };

        // De-index under the old keys before any field changes
        self.indexes.remove(product);
        patch.apply_to(product);
        self.indexes.insert(product);
        Ok(true)
    }

    // == Delete ==
    /// Removes a product; returns false if it was not present.
    pub fn delete(&mut self, id: u64) -> bool {
        match self.products.remove(&id) {
            Some(product) => {
                self.indexes.remove(&product);
                true
            }
            None => false,
        }
    }

    // == Get ==
    pub fn get(&self, id: u64) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    // == Find All ==
    /// Every product, ascending by id.
    pub fn find_all(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.products.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    // == Search ==
    /// Index-assisted search.
    ///
    /// Category, brand and price narrow the candidate ids through the indexes;
    /// the name substring is then checked on the surviving records. Results
    /// are sorted ascending by id.
    pub fn search(&self, query: &SearchQuery) -> Vec<Product> {
        // None = unconstrained
        let mut candidates: Option<Bucket> = None;

        if let Some(category) = query.category_key() {
            match self.indexes.category(&category) {
                Some(bucket) => candidates = Some(intersect(candidates, bucket)),
                None => return Vec::new(),
            }
        }

        if let Some(brand) = query.brand_key() {
            match self.indexes.brand(&brand) {
                Some(bucket) => candidates = Some(intersect(candidates, bucket)),
                None => return Vec::new(),
            }
        }

        if query.has_price_bound() {
            let in_range = self.indexes.price_range(query.price_min, query.price_max);
            candidates = Some(intersect(candidates, &in_range));
        }

        let name_filter = query.name_key();
        let matches_name = |product: &Product| match &name_filter {
            Some(needle) => product.name.to_lowercase().contains(needle.as_str()),
            None => true,
        };

        let mut results: Vec<Product> = match candidates {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.products.get(id))
                .filter(|p| matches_name(*p))
                .cloned()
                .collect(),
            None => self
                .products
                .values()
                .filter(|p| matches_name(*p))
                .cloned()
                .collect(),
        };
        results.sort_by_key(|p| p.id);

        debug!(
            "Store search {} matched {} of {} products",
            query.cache_key(),
            results.len(),
            self.products.len()
        );
        results
    }

    // == Count ==
    pub fn count(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Verifies the index invariant against the primary map.
    pub fn check_indexes(&self) -> std::result::Result<(), String> {
        self.indexes.verify(self.products.values())
    }
}

fn id_space_exhausted() -> CatalogError {
    CatalogError::Validation("Product id space exhausted".to_string())
}

fn intersect(candidates: Option<Bucket>, bucket: &Bucket) -> Bucket {
    match candidates {
        Some(current) => current.intersection(bucket).copied().collect(),
        None => bucket.clone(),
    }
}
