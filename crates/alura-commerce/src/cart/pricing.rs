//! Cart pricing calculations.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default sales tax rate: 5%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Default flat shipping charge: $7.50.
pub const DEFAULT_FLAT_SHIPPING: Money = Money::new(750);

/// Tax and shipping rules applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Tax rate in basis points of the subtotal.
    pub tax_rate_bps: u32,
    /// Flat shipping charged on any non-empty order.
    pub flat_shipping: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            flat_shipping: DEFAULT_FLAT_SHIPPING,
        }
    }
}

impl PricingPolicy {
    /// Compute the order totals for a subtotal.
    ///
    /// Shipping applies only when the subtotal is positive, and an empty
    /// order totals zero.
    pub fn totals(&self, subtotal: Money) -> Totals {
        let tax = subtotal.apply_rate_bps(self.tax_rate_bps);

        if !subtotal.is_positive() {
            return Totals {
                subtotal,
                tax,
                shipping: Money::zero(),
                total: Money::zero(),
            };
        }

        Totals {
            subtotal,
            tax,
            shipping: self.flat_shipping,
            total: subtotal + self.flat_shipping + tax,
        }
    }
}

/// Complete pricing breakdown for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of resolvable line totals.
    pub subtotal: Money,
    /// Sales tax.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Final total (subtotal + shipping + tax).
    pub total: Money,
}
