//! Search Query Module
//!
//! The five search predicates, their validation and canonical cache key.

use serde::Deserialize;

use crate::catalog::product::normalize_price;
use crate::error::{CatalogError, Result};

// == Search Query ==
/// Optional predicates combined with AND semantics.
///
/// Blank text filters count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    #[serde(default)]
    pub name: Option<String>,
    /// Case-insensitive exact category
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive exact brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Inclusive lower price bound
    #[serde(default, rename = "min_price")]
    pub price_min: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default, rename = "max_price")]
    pub price_max: Option<f64>,
}

impl SearchQuery {
    /// An unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn price_min(mut self, min: f64) -> Self {
        self.price_min = Some(min);
        self
    }

    pub fn price_max(mut self, max: f64) -> Self {
        self.price_max = Some(max);
        self
    }

    pub fn price_between(self, min: f64, max: f64) -> Self {
        self.price_min(min).price_max(max)
    }

    // == Normalized Filters ==
    pub fn name_key(&self) -> Option<String> {
        normalize(&self.name)
    }

    pub fn category_key(&self) -> Option<String> {
        normalize(&self.category)
    }

    pub fn brand_key(&self) -> Option<String> {
        normalize(&self.brand)
    }

    pub fn has_price_bound(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }

    // == Validate ==
    /// Rejects negative, non-finite or inverted price bounds.
    pub fn validate(&self) -> Result<()> {
        for (label, bound) in [("Minimum", self.price_min), ("Maximum", self.price_max)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(CatalogError::Validation(format!(
                        "{} price must be a finite number",
                        label
                    )));
                }
                if value < 0.0 {
                    return Err(CatalogError::Validation(format!(
                        "{} price cannot be negative",
                        label
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(CatalogError::Validation(
                    "Minimum price cannot be greater than maximum price".to_string(),
                ));
            }
        }
        Ok(())
    }

    // == Cache Key ==
    /// Canonical key: `n=..|c=..|b=..|min=..|max=..`.
    ///
    /// Text filters are lower-cased and blank ones render as `null`, so
    /// queries that must return the same rows share a key.
    pub fn cache_key(&self) -> String {
        format!(
            "n={}|c={}|b={}|min={}|max={}",
            self.name_key().as_deref().unwrap_or("null"),
            self.category_key().as_deref().unwrap_or("null"),
            self.brand_key().as_deref().unwrap_or("null"),
            format_bound(self.price_min),
            format_bound(self.price_max),
        )
    }
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_lowercase)
}

fn format_bound(bound: Option<f64>) -> String {
    match bound {
        Some(value) => format!("{:?}", normalize_price(value)),
        None => "null".to_string(),
    }
}
