//! Cart and line item types.

use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One product in the cart.
///
/// Serializes as the persisted `{"id": 101, "quantity": 2}` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

/// A shopping cart: line items in insertion order.
///
/// Holds at most one line per product and never a line with quantity zero.
/// Deserializing enforces the same rules, so a corrupt persisted cart fails
/// to load instead of producing an invalid cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines, validating them.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for line in &lines {
            if line.quantity == 0 {
                return Err(CommerceError::InvalidQuantity {
                    id: line.id,
                    quantity: line.quantity,
                });
            }
            if !seen.insert(line.id) {
                return Err(CommerceError::DuplicateCartLine(line.id));
            }
        }
        Ok(Self { lines })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Quantity of a product, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    /// Quantities saturate at `u32::MAX`.
    /// Returns whether the cart changed.
    pub fn increment(&mut self, id: ProductId) -> bool {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            let next = line.quantity.saturating_add(1);
            let changed = next != line.quantity;
            line.quantity = next;
            return changed;
        }

        self.lines.push(CartLine { id, quantity: 1 });
        true
    }

    /// Change a line's quantity by `delta`.
    ///
    /// Does nothing if the product has no line. A resulting quantity of zero
    /// or less removes the line; otherwise the line keeps its position.
    /// Returns whether the cart changed.
    pub fn apply_delta(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return false;
        };

        let current = self.lines[index].quantity;
        let new_quantity = i64::from(current).saturating_add(delta);

        if new_quantity <= 0 {
            self.lines.remove(index);
            return true;
        }

        let saturated = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if saturated == current {
            return false;
        }
        self.lines[index].quantity = saturated;
        true
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.lines.is_empty();
        self.lines.clear();
        had_items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price times quantity over lines whose product is in the catalog.
    ///
    /// Lines referencing products missing from the catalog contribute nothing.
    pub fn subtotal(&self, catalog: &Catalog) -> Money {
        self.resolved_lines(catalog).map(|l| l.line_total).sum()
    }

    /// Lines joined with their catalog products, skipping unknown products.
    pub fn resolved_lines<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = ResolvedLine> + 'a {
        self.lines.iter().filter_map(move |line| {
            let product = catalog.get(line.id)?;
            Some(ResolvedLine::new(product.clone(), line.quantity))
        })
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CommerceError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// A cart line joined with its product, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLine {
    /// The product.
    pub product: Product,
    /// Quantity.
    pub quantity: u32,
    /// Unit price times quantity.
    pub line_total: Money,
}

impl ResolvedLine {
    fn new(product: Product, quantity: u32) -> Self {
        let line_total = product.price * i64::from(quantity);
        Self {
            product,
            quantity,
            line_total,
        }
    }
}
