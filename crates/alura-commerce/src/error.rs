//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur while building or validating storefront data.
///
/// Cart mutations never return these: unknown products and malformed
/// persisted carts are absorbed by the cart store. They surface only where a
/// caller hands in data to validate, such as a catalog file or a form field.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Two catalog entries share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    /// A catalog price is negative or not a number.
    #[error("Invalid price for product {id}: {price}")]
    InvalidPrice { id: ProductId, price: f64 },

    /// A cart line has a quantity of zero.
    #[error("Invalid quantity {quantity} for product {id}")]
    InvalidQuantity { id: ProductId, quantity: u32 },

    /// The same product appears on two cart lines.
    #[error("Duplicate cart line for product {0}")]
    DuplicateCartLine(ProductId),

    /// Unknown checkout form field.
    #[error("Unknown checkout field: {0}")]
    UnknownField(String),

    /// Invalid product id text.
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
