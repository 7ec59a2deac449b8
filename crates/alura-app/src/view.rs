//! Derived values for rendering.

use alura_commerce::prelude::*;
use serde::Serialize;

use crate::checkout::CheckoutView;
use crate::navigation::Page;
use crate::notification::Notification;

/// Everything a rendering surface needs, recomputed from state on each
/// change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorefrontView {
    pub page: Page,
    /// Cart lines with their products, in cart order. Lines whose product is
    /// no longer in the catalog are left out.
    pub lines: Vec<ResolvedLine>,
    pub totals: Totals,
    pub item_count: u64,
    pub notification: Option<Notification>,
    pub cart_open: bool,
    pub checkout: CheckoutView,
}

impl StorefrontView {
    /// Whether the cart drawer's checkout button is enabled.
    pub fn can_checkout(&self) -> bool {
        self.totals.subtotal.is_positive()
    }
}
