//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are created once when the catalog is built and never change
/// during a session.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Display category (e.g., "Fashion").
    pub category: String,
    /// Image reference (URL or asset path).
    pub image_ref: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// A product as written in a catalog file, with a decimal price.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(alias = "image")]
    pub image_ref: String,
}
