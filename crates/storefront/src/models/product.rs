//! Product domain types.

use juniper_core::{Price, ProductId};

/// A catalog product.
///
/// The catalog is read-only from the web application's perspective; rows are
/// seeded via `juniper-cli seed`.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Descriptive copy for the detail page.
    pub description: String,
    /// Current price in minor currency units.
    pub price: Price,
    /// Optional product image URL.
    pub image_url: Option<String>,
}
