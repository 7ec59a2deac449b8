//! Simulated order submission.

use std::time::Duration;

use alura_commerce::prelude::*;
use serde::Serialize;

use crate::navigation::Page;
use crate::notification::{NotificationChannel, NotificationKind};
use crate::timers::{TimerSlot, TimerTask, Timers};

/// Notification shown after an order goes through.
pub const ORDER_CONFIRMATION: &str = "Order placed successfully. Thank you for choosing Alúra.";

/// What the checkout page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutView {
    /// The cart is empty: a prompt to keep shopping, no order form.
    EmptyPrompt,
    /// The order form next to the order summary.
    Form,
}

impl CheckoutView {
    pub fn for_cart(cart: &CartStore) -> Self {
        if cart.is_empty() {
            Self::EmptyPrompt
        } else {
            Self::Form
        }
    }
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The order was placed.
    Submitted(OrderReceipt),
    /// Nothing to order; the form is not shown for an empty cart.
    EmptyCart,
    /// A required field was left blank.
    IncompleteForm,
    /// Submitted while another page was showing.
    NotOnCheckout,
}

impl CheckoutOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// State an order submission reads and changes.
pub struct CheckoutContext<'a> {
    pub page: Page,
    pub cart: &'a mut CartStore,
    pub notifications: &'a mut NotificationChannel,
    pub timers: &'a mut Timers,
    pub now: Duration,
}

/// Places simulated orders.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutOrchestrator {
    pricing: PricingPolicy,
    redirect_delay: Duration,
}

impl CheckoutOrchestrator {
    pub fn new(pricing: PricingPolicy, redirect_delay: Duration) -> Self {
        Self {
            pricing,
            redirect_delay,
        }
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    /// Submit the checkout form.
    ///
    /// On success the cart is emptied, a confirmation is shown and a return to
    /// the home page is scheduled. No payment is taken and there is no
    /// failure path once the form is accepted. Every other outcome leaves
    /// state untouched.
    pub fn submit_order(&self, ctx: CheckoutContext<'_>, form_complete: bool) -> CheckoutOutcome {
        if ctx.page != Page::Checkout {
            tracing::debug!(page = %ctx.page, "ignoring order submitted outside checkout");
            return CheckoutOutcome::NotOnCheckout;
        }
        if ctx.cart.is_empty() {
            tracing::debug!("ignoring order for empty cart");
            return CheckoutOutcome::EmptyCart;
        }
        if !form_complete {
            tracing::debug!("ignoring incomplete checkout form");
            return CheckoutOutcome::IncompleteForm;
        }

        let receipt = OrderReceipt::capture(ctx.cart, &self.pricing);
        tracing::info!(
            items = receipt.item_count(),
            total = %receipt.totals.total,
            "simulated payment and fulfillment"
        );

        ctx.cart.clear();
        ctx.notifications
            .show(ORDER_CONFIRMATION, NotificationKind::Success, ctx.timers, ctx.now);
        ctx.timers.schedule(
            TimerSlot::CheckoutRedirect,
            ctx.now,
            self.redirect_delay,
            TimerTask::NavigateHome,
        );

        CheckoutOutcome::Submitted(receipt)
    }
}

impl Default for CheckoutOrchestrator {
    fn default() -> Self {
        Self::new(PricingPolicy::default(), crate::config::DEFAULT_CHECKOUT_REDIRECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationTiming;
    use alura_cache::Cache;
    use std::sync::Arc;

    struct Fixture {
        cart: CartStore,
        notifications: NotificationChannel,
        timers: Timers,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cart: CartStore::open(
                    Arc::new(Catalog::alura_collection()),
                    Cache::memory(),
                    DEFAULT_CART_KEY,
                ),
                notifications: NotificationChannel::new(NotificationTiming::default()),
                timers: Timers::new(),
            }
        }

        fn submit(&mut self, page: Page, form_complete: bool) -> CheckoutOutcome {
            CheckoutOrchestrator::default().submit_order(
                CheckoutContext {
                    page,
                    cart: &mut self.cart,
                    notifications: &mut self.notifications,
                    timers: &mut self.timers,
                    now: Duration::from_millis(1000),
                },
                form_complete,
            )
        }
    }

    #[test]
    fn test_submit_clears_and_schedules() {
        let mut fx = Fixture::new();
        fx.cart.add_item(ProductId::new(102));

        let outcome = fx.submit(Page::Checkout, true);
        let CheckoutOutcome::Submitted(receipt) = outcome else {
            panic!("expected submission, got {outcome:?}");
        };
        assert_eq!(receipt.totals.subtotal, Money::new(15900));

        assert!(fx.cart.is_empty());
        assert_eq!(fx.notifications.current().unwrap().message, ORDER_CONFIRMATION);
        assert_eq!(
            fx.timers.deadline(&TimerSlot::CheckoutRedirect),
            Some(Duration::from_millis(1100))
        );
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let mut fx = Fixture::new();
        assert_eq!(fx.submit(Page::Checkout, true), CheckoutOutcome::EmptyCart);

        fx.cart.add_item(ProductId::new(101));
        assert_eq!(fx.submit(Page::Home, true), CheckoutOutcome::NotOnCheckout);
        assert_eq!(fx.submit(Page::Checkout, false), CheckoutOutcome::IncompleteForm);

        assert_eq!(fx.cart.item_count(), 1);
        assert!(fx.notifications.current().is_none());
        assert!(fx.timers.is_empty());
    }

    #[test]
    fn test_checkout_view() {
        let mut fx = Fixture::new();
        assert_eq!(CheckoutView::for_cart(&fx.cart), CheckoutView::EmptyPrompt);
        fx.cart.add_item(ProductId::new(106));
        assert_eq!(CheckoutView::for_cart(&fx.cart), CheckoutView::Form);
    }
}
