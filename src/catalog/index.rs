//! Index Module
//!
//! Secondary indexes over the product table: category, brand and price.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::catalog::product::normalize_price;
use crate::catalog::Product;

/// Ids sharing one normalized index key.
pub type Bucket = BTreeSet<u64>;

// == Price Key ==
/// Totally ordered price used as the price index key.
///
/// Stored prices are finite and never `-0.0`, so `total_cmp` agrees with `==`.
#[derive(Debug, Clone, Copy)]
pub struct PriceKey(pub f64);

impl PartialEq for PriceKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriceKey {}

impl PartialOrd for PriceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// == Product Indexes ==
/// The three derived indexes, kept in lockstep with the primary map.
///
/// Empty buckets are always removed.
#[derive(Debug, Default)]
pub struct ProductIndexes {
    by_category: HashMap<String, Bucket>,
    by_brand: HashMap<String, Bucket>,
    by_price: BTreeMap<PriceKey, Bucket>,
}

impl ProductIndexes {
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Adds the product's id under its current category, brand and price.
    pub fn insert(&mut self, product: &Product) {
        self.by_category
            .entry(product.category_key())
            .or_default()
            .insert(product.id);
        self.by_brand
            .entry(product.brand_key())
            .or_default()
            .insert(product.id);
        self.by_price
            .entry(PriceKey(product.price))
            .or_default()
            .insert(product.id);
    }

    // == Remove ==
    /// De-indexes the product using its current field values.
    ///
    /// Must be called before any indexed field is mutated.
    pub fn remove(&mut self, product: &Product) {
        remove_from_hashed(&mut self.by_category, &product.category_key(), product.id);
        remove_from_hashed(&mut self.by_brand, &product.brand_key(), product.id);
        remove_from(&mut self.by_price, &PriceKey(product.price), product.id);
    }

    // == Lookups ==
    /// Ids in the bucket for a lower-cased category.
    pub fn category(&self, key: &str) -> Option<&Bucket> {
        self.by_category.get(key)
    }

    /// Ids in the bucket for a lower-cased brand.
    pub fn brand(&self, key: &str) -> Option<&Bucket> {
        self.by_brand.get(key)
    }

    /// Union of price buckets within `[min, max]`.
    ///
    /// A missing bound resolves to the smallest or largest price currently
    /// indexed, so an empty index always yields an empty set.
    pub fn price_range(&self, min: Option<f64>, max: Option<f64>) -> Bucket {
        let (Some((lowest, _)), Some((highest, _))) =
            (self.by_price.first_key_value(), self.by_price.last_key_value())
        else {
            return Bucket::new();
        };

        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return Bucket::new();
        }

        let lo = min.map(|v| PriceKey(normalize_price(v))).unwrap_or(*lowest);
        let hi = max.map(|v| PriceKey(normalize_price(v))).unwrap_or(*highest);
        // BTreeMap::range panics on an inverted range
        if lo > hi {
            return Bucket::new();
        }

        self.by_price
            .range(lo..=hi)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.by_category.clear();
        self.by_brand.clear();
        self.by_price.clear();
    }

    // == Introspection ==
    /// Number of distinct (category, brand, price) keys.
    pub fn key_counts(&self) -> (usize, usize, usize) {
        (
            self.by_category.len(),
            self.by_brand.len(),
            self.by_price.len(),
        )
    }

    /// Checks that the indexes mirror `products` exactly.
    ///
    /// Returns a description of the first violation found.
    pub fn verify<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> std::result::Result<(), String> {
        let mut expected = ProductIndexes::new();
        for product in products {
            expected.insert(product);
        }

        if self.by_category != expected.by_category {
            return Err(format!(
                "category index mismatch: {:?} != {:?}",
                self.by_category, expected.by_category
            ));
        }
        if self.by_brand != expected.by_brand {
            return Err(format!(
                "brand index mismatch: {:?} != {:?}",
                self.by_brand, expected.by_brand
            ));
        }
        if self.by_price != expected.by_price {
            return Err(format!(
                "price index mismatch: {:?} != {:?}",
                self.by_price, expected.by_price
            ));
        }
        Ok(())
    }
}

fn remove_from<K: Ord>(index: &mut BTreeMap<K, Bucket>, key: &K, id: u64) {
    if let Some(bucket) = index.get_mut(key) {
        bucket.remove(&id);
        if bucket.is_empty() {
            index.remove(key);
        }
    }
}

fn remove_from_hashed(index: &mut HashMap<String, Bucket>, key: &str, id: u64) {
    if let Some(bucket) = index.get_mut(key) {
        bucket.remove(&id);
        if bucket.is_empty() {
            index.remove(key);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: u64, category: &str, brand: &str, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: format!("product-{}", id),
            category: category.to_string(),
            brand: brand.to_string(),
            price,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_normalizes_keys() {
        let mut indexes = ProductIndexes::new();
        indexes.insert(&product(1, "Electronics", "Apple", 10.0));
        indexes.insert(&product(2, "ELECTRONICS", "apple", 10.0));

        assert_eq!(indexes.category("electronics").unwrap().len(), 2);
        assert_eq!(indexes.brand("apple").unwrap().len(), 2);
        assert_eq!(indexes.key_counts(), (1, 1, 1));
    }

    #[test]
    fn test_remove_drops_empty_buckets() {
        let mut indexes = ProductIndexes::new();
        let p = product(1, "Books", "Penguin", 12.0);
        indexes.insert(&p);
        indexes.remove(&p);

        assert!(indexes.category("books").is_none());
        assert!(indexes.brand("penguin").is_none());
        assert_eq!(indexes.key_counts(), (0, 0, 0));
    }

    #[test]
    fn test_price_range_inclusive_bounds() {
        let mut indexes = ProductIndexes::new();
        indexes.insert(&product(1, "a", "b", 99.99));
        indexes.insert(&product(2, "a", "b", 100.0));
        indexes.insert(&product(3, "a", "b", 150.0));
        indexes.insert(&product(4, "a", "b", 200.0));
        indexes.insert(&product(5, "a", "b", 200.01));

        let ids: Vec<u64> = indexes
            .price_range(Some(100.0), Some(200.0))
            .into_iter()
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_price_range_missing_bounds_use_indexed_extremes() {
        let mut indexes = ProductIndexes::new();
        indexes.insert(&product(1, "a", "b", 5.0));
        indexes.insert(&product(2, "a", "b", 50.0));

        assert_eq!(indexes.price_range(None, Some(10.0)).len(), 1);
        assert_eq!(indexes.price_range(Some(10.0), None).len(), 1);
        assert_eq!(indexes.price_range(None, None).len(), 2);
    }

    #[test]
    fn test_price_range_empty_index() {
        let indexes = ProductIndexes::new();
        assert!(indexes.price_range(Some(0.0), Some(100.0)).is_empty());
        assert!(indexes.price_range(None, None).is_empty());
    }

    #[test]
    fn test_price_range_inverted_or_nan() {
        let mut indexes = ProductIndexes::new();
        indexes.insert(&product(1, "a", "b", 5.0));

        assert!(indexes.price_range(Some(10.0), Some(1.0)).is_empty());
        assert!(indexes.price_range(Some(f64::NAN), None).is_empty());
        // Bound above every indexed price with no max
        assert!(indexes.price_range(Some(10.0), None).is_empty());
    }

    #[test]
    fn test_price_range_negative_zero_bounds() {
        let mut indexes = ProductIndexes::new();
        indexes.insert(&product(1, "a", "b", 0.0));

        assert_eq!(indexes.price_range(None, Some(-0.0)).len(), 1);
        assert_eq!(indexes.price_range(Some(-0.0), Some(0.0)).len(), 1);
    }

    #[test]
    fn test_verify_detects_stale_bucket() {
        let mut indexes = ProductIndexes::new();
        let mut p = product(1, "Books", "Penguin", 12.0);
        indexes.insert(&p);

        p.category = "Music".to_string();
        assert!(indexes.verify([&p]).is_err());

        indexes.clear();
        indexes.insert(&p);
        assert!(indexes.verify([&p]).is_ok());
    }
}
