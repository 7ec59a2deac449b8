//! Catalog, cart and checkout domain types for the Alura storefront.
//!
//! This crate holds the storefront's business state, independent of how it is
//! rendered:
//!
//! - **Catalog**: the immutable product list every price lookup goes through
//! - **Cart**: ordered line items, the persisted [`CartStore`], totals
//! - **Checkout**: presence-validated checkout form and order receipts
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use alura_cache::Cache;
//! use alura_commerce::prelude::*;
//!
//! let catalog = Arc::new(Catalog::alura_collection());
//! let mut store = CartStore::open(catalog, Cache::memory(), DEFAULT_CART_KEY);
//!
//! store.add_item(ProductId::new(101));
//! store.add_item(ProductId::new(101));
//!
//! assert_eq!(store.item_count(), 2);
//! assert_eq!(store.subtotal().display(), "$98.00");
//!
//! let totals = PricingPolicy::default().totals(store.subtotal());
//! assert_eq!(totals.total.display(), "$110.40");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{
        Cart, CartLine, CartStore, PricingPolicy, ResolvedLine, Totals, DEFAULT_CART_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutForm, ContactDetails, OrderReceipt, PaymentDetails, ShippingAddress,
    };
}
