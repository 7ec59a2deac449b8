//! Checkout module.
//!
//! Contains the checkout form and the receipt of a simulated order.

mod form;
mod order;

pub use form::{CheckoutForm, ContactDetails, PaymentDetails, ShippingAddress};
pub use order::OrderReceipt;
