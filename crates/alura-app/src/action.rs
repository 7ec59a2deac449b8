//! Everything the presentation layer can ask the storefront to do.

use alura_commerce::prelude::*;

use crate::navigation::Page;
use crate::notification::NotificationKind;

/// A request from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add one unit of a product and confirm it with a notification.
    AddToCart(ProductId),
    /// Change a line's quantity by `delta`.
    UpdateQuantity { id: ProductId, delta: i64 },
    ClearCart,
    Navigate(Page),
    ShowNotification {
        message: String,
        kind: NotificationKind,
    },
    /// Open or close the cart drawer.
    ToggleCart,
    /// The cart drawer's checkout button.
    ProceedToCheckout,
    /// Submit the checkout form; `form_complete` is the presence check result.
    SubmitOrder { form_complete: bool },
}

impl Action {
    /// Submit a filled-in checkout form.
    pub fn submit_form(form: &CheckoutForm) -> Self {
        Self::SubmitOrder {
            form_complete: form.is_complete(),
        }
    }

    pub fn notify(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self::ShowNotification {
            message: message.into(),
            kind,
        }
    }
}
