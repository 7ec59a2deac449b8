//! Change subscriptions.

use crate::view::StorefrontView;

/// Receives the storefront's view after every change.
pub trait StorefrontObserver: Send {
    fn on_change(&self, view: &StorefrontView);
}

impl<F> StorefrontObserver for F
where
    F: Fn(&StorefrontView) + Send,
{
    fn on_change(&self, view: &StorefrontView) {
        self(view)
    }
}

/// Identifies a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
