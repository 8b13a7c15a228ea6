//! Catalog Module
//!
//! Product records, their secondary indexes and the indexed product store.

mod index;
mod product;
mod search;
mod store;


// Re-export public types
pub use index::{Bucket, PriceKey, ProductIndexes};
pub use product::{NewProduct, Product, ProductPatch};
pub use search::SearchQuery;
pub use store::ProductStore;
