//! Order receipts.

use crate::cart::{CartStore, PricingPolicy, ResolvedLine, Totals};
use serde::Serialize;

/// Snapshot of what was ordered, taken just before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    /// Ordered lines with their products.
    pub lines: Vec<ResolvedLine>,
    /// Totals charged.
    pub totals: Totals,
}

impl OrderReceipt {
    /// Capture the current contents of a cart store.
    pub fn capture(store: &CartStore, pricing: &PricingPolicy) -> Self {
        Self {
            lines: store.resolved_lines(),
            totals: pricing.totals(store.subtotal()),
        }
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
