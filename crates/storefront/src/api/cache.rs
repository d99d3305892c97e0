//! Cache types for backend API responses.

use crate::api::types::{Category, Product};

/// Cached value types. Only read-mostly catalog data is cached; cart and
/// favorites are mutable state and always hit the network.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Product(Box<Product>),
}
