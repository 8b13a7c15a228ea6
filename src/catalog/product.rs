//! Product Module
//!
//! Defines the product record, creation input and partial-update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

// == Product ==
/// A catalog product as owned by the store.
///
/// Callers only ever receive clones; the store keeps the live instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, never reused
    pub id: u64,
    pub name: String,
    /// Matched case-insensitively
    pub category: String,
    /// Matched case-insensitively
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Lower-cased category, the category index key.
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }

    /// Lower-cased brand, the brand index key.
    pub fn brand_key(&self) -> String {
        self.brand.to_lowercase()
    }

    /// Checks the record invariants shared by create, update and seeding.
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("category", &self.category)?;
        validate_required("brand", &self.brand)?;
        validate_price(self.price)?;
        if self.id == 0 {
            return Err(CatalogError::Validation(
                "Product id must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// == New Product ==
/// Input for creating a product; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub description: String,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            brand: brand.into(),
            price,
            description: description.into(),
        }
    }

    /// Validates the input before an id is allocated.
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("category", &self.category)?;
        validate_required("brand", &self.brand)?;
        validate_price(self.price)
    }
}

// == Product Patch ==
/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ProductPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }

    /// Validates only the supplied fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        if let Some(category) = &self.category {
            validate_required("category", category)?;
        }
        if let Some(brand) = &self.brand {
            validate_required("brand", brand)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Applies the supplied fields and refreshes `updated_at` if anything was set.
    pub(crate) fn apply_to(self, product: &mut Product) {
        if self.is_empty() {
            return;
        }
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(brand) = self.brand {
            product.brand = brand;
        }
        if let Some(price) = self.price {
            product.price = normalize_price(price);
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        product.updated_at = Utc::now();
    }
}

// == Validation Helpers ==
fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(CatalogError::Validation(
            "Price must be a finite number".to_string(),
        ));
    }
    if price < 0.0 {
        return Err(CatalogError::Validation(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Folds `-0.0` into `0.0` so both land in one price bucket.
pub(crate) fn normalize_price(price: f64) -> f64 {
    if price == 0.0 {
        0.0
    } else {
        price
    }
}
