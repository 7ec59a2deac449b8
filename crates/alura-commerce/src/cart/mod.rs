//! Shopping cart module.
//!
//! Contains the cart state machine, its persistent store, and pricing.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartLine, ResolvedLine};
pub use pricing::{PricingPolicy, Totals, DEFAULT_FLAT_SHIPPING, DEFAULT_TAX_RATE_BPS};
pub use store::{CartStore, DEFAULT_CART_KEY};
