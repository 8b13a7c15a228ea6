//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::catalog::{NewProduct, ProductPatch};

/// Request body for POST /products
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct::new(req.name, req.category, req.brand, req.price, req.description)
    }
}

/// Request body for PATCH /products/:id
///
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateProductRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.price.is_none()
            && self.description.is_none()
        {
            return Some("No fields to update".to_string());
        }
        None
    }
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            name: req.name,
            category: req.category,
            brand: req.brand,
            price: req.price,
            description: req.description,
        }
    }
}
