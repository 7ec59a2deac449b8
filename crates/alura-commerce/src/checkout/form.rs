//! Checkout form: contact, shipping and payment details.
//!
//! Validation is presence-only. A field counts as filled when it has any
//! non-whitespace content; formats (email, card number, expiry) are not
//! checked because no real payment is taken.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Contact information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Email address.
    pub email: String,
}

/// A postal address to ship to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal/ZIP code.
    pub postal_code: String,
}

impl ShippingAddress {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {} {}",
            self.street.trim(),
            self.city.trim(),
            self.postal_code.trim()
        )
    }
}

/// Simulated card details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Name on card.
    pub name_on_card: String,
    /// Card number.
    pub card_number: String,
    /// Expiry as typed (MM/YY).
    pub expiry: String,
    /// Security code.
    pub cvv: String,
}

/// The checkout form as submitted by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub contact: ContactDetails,
    pub shipping: ShippingAddress,
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    /// Field names with their display labels, in form order.
    pub const FIELDS: [(&'static str, &'static str); 10] = [
        ("email", "Email Address"),
        ("first_name", "First Name"),
        ("last_name", "Last Name"),
        ("street", "Street Address"),
        ("city", "City"),
        ("postal_code", "Postal Code"),
        ("name_on_card", "Name on Card"),
        ("card_number", "Card Number"),
        ("expiry", "MM/YY"),
        ("cvv", "CVV"),
    ];

    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match normalize(name).as_str() {
            "email" => &self.contact.email,
            "first_name" => &self.shipping.first_name,
            "last_name" => &self.shipping.last_name,
            "street" => &self.shipping.street,
            "city" => &self.shipping.city,
            "postal_code" => &self.shipping.postal_code,
            "name_on_card" => &self.payment.name_on_card,
            "card_number" => &self.payment.card_number,
            "expiry" => &self.payment.expiry,
            "cvv" => &self.payment.cvv,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Set a field by name (`first_name` and `first-name` are equivalent).
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), CommerceError> {
        let slot = match normalize(name).as_str() {
            "email" => &mut self.contact.email,
            "first_name" => &mut self.shipping.first_name,
            "last_name" => &mut self.shipping.last_name,
            "street" => &mut self.shipping.street,
            "city" => &mut self.shipping.city,
            "postal_code" => &mut self.shipping.postal_code,
            "name_on_card" => &mut self.payment.name_on_card,
            "card_number" => &mut self.payment.card_number,
            "expiry" => &mut self.payment.expiry,
            "cvv" => &mut self.payment.cvv,
            _ => return Err(CommerceError::UnknownField(name.to_string())),
        };
        *slot = value.into();
        Ok(())
    }

    /// Labels of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|(name, _)| self.field(name).map_or(true, |v| v.trim().is_empty()))
            .map(|(_, label)| *label)
            .collect()
    }

    /// Check that every required field is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        let mut form = CheckoutForm::new();
        for (name, label) in CheckoutForm::FIELDS {
            form.set_field(name, format!("{label} value")).unwrap();
        }
        form
    }

    #[test]
    fn test_empty_form_misses_everything() {
        let form = CheckoutForm::new();
        assert_eq!(form.missing_fields().len(), 10);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_filled_form_is_complete() {
        assert!(filled().is_complete());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = filled();
        form.set_field("cvv", "   ").unwrap();
        assert_eq!(form.missing_fields(), vec!["CVV"]);
    }

    #[test]
    fn test_presence_only_validation() {
        let mut form = filled();
        form.set_field("email", "not-an-email").unwrap();
        form.set_field("card-number", "abc").unwrap();
        assert!(form.is_complete());
        assert_eq!(form.payment.card_number, "abc");
    }

    #[test]
    fn test_unknown_field() {
        let mut form = CheckoutForm::new();
        assert!(matches!(
            form.set_field("coupon", "SAVE10"),
            Err(CommerceError::UnknownField(_))
        ));
        assert_eq!(form.field("coupon"), None);
    }

    #[test]
    fn test_address_formatting() {
        let mut form = CheckoutForm::new();
        form.set_field("first_name", "Jane").unwrap();
        form.set_field("last_name", "Smith").unwrap();
        form.set_field("street", "456 Oak Ave").unwrap();
        form.set_field("city", "Los Angeles").unwrap();
        form.set_field("postal_code", "90001").unwrap();

        assert_eq!(form.shipping.full_name(), "Jane Smith");
        assert_eq!(form.shipping.one_line(), "456 Oak Ave, Los Angeles 90001");
    }
}
