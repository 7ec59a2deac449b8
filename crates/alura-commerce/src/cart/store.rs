//! Persistent cart store.

use std::sync::Arc;

use alura_cache::Cache;

use crate::cart::{Cart, ResolvedLine};
use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "aluraCart";

/// Owns the session's cart and mirrors it into durable storage.
///
/// The whole cart is written on every mutation that changes it and read once
/// when the store opens. Storage problems never reach the caller: an
/// unreadable cart loads as empty and a failed write is logged.
pub struct CartStore {
    cart: Cart,
    catalog: Arc<Catalog>,
    cache: Cache,
    key: String,
}

impl CartStore {
    /// Open the store, loading any previously persisted cart.
    pub fn open(catalog: Arc<Catalog>, cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(&cache, &key);
        Self {
            cart,
            catalog,
            cache,
            key,
        }
    }

    /// Add one unit of a product. Unknown products are ignored.
    ///
    /// Returns whether the cart changed.
    pub fn add_item(&mut self, id: ProductId) -> bool {
        if !self.catalog.contains(id) {
            tracing::debug!(product_id = %id, "ignoring add for unknown product");
            return false;
        }

        let changed = self.cart.increment(id);
        if changed {
            tracing::debug!(product_id = %id, quantity = self.cart.quantity_of(id), "item added");
            self.persist();
        }
        changed
    }

    /// Change a line's quantity by `delta`, removing it at zero.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> bool {
        let changed = self.cart.apply_delta(id, delta);
        if changed {
            tracing::debug!(product_id = %id, delta, quantity = self.cart.quantity_of(id), "quantity updated");
            self.persist();
        }
        changed
    }

    /// Remove every line and persist the empty cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// Subtotal over lines whose product is in the catalog.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal(&self.catalog)
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Lines joined with their products, in cart order.
    pub fn resolved_lines(&self) -> Vec<ResolvedLine> {
        self.cart.resolved_lines(&self.catalog).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            tracing::error!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

fn load_cart(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Cart>(key) {
        Ok(Some(cart)) => {
            tracing::debug!(key, lines = cart.unique_item_count(), "restored cart");
            cart
        }
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load cart from storage, starting empty");
            Cart::new()
        }
    }
}
