//! The storefront state container.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alura_cache::Cache;
use alura_commerce::prelude::*;
use alura_executor::{Clock, SystemClock};

use crate::action::Action;
use crate::checkout::{CheckoutContext, CheckoutOrchestrator, CheckoutOutcome, CheckoutView};
use crate::config::StorefrontConfig;
use crate::navigation::{Navigator, NoopViewport, Page, Viewport};
use crate::notification::{Notification, NotificationChannel, NotificationKind};
use crate::observer::{StorefrontObserver, SubscriptionId};
use crate::timers::{TimerTask, Timers};
use crate::view::StorefrontView;
use crate::AppError;

/// Notification confirming an add-to-cart.
pub const ITEM_ADDED: &str = "Item added to bag.";

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dispatched {
    /// Whether any state changed (observers were notified).
    pub changed: bool,
    /// Outcome of a [`Action::SubmitOrder`].
    pub checkout: Option<CheckoutOutcome>,
}

/// Builder for [`Storefront`].
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    cache: Option<Cache>,
    catalog: Option<Arc<Catalog>>,
    clock: Option<Box<dyn Clock + Send>>,
    viewport: Option<Box<dyn Viewport>>,
}

impl StorefrontBuilder {
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            config,
            cache: None,
            catalog: None,
            clock: None,
            viewport: None,
        }
    }

    /// Durable storage for the cart. Defaults to in-memory.
    pub fn cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use this catalog instead of loading one from the config.
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Time source for timers. Defaults to the system clock.
    pub fn clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    pub fn build(self) -> Result<Storefront, AppError> {
        self.config.validate()?;

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(self.config.load_catalog()?),
        };
        let cache = self.cache.unwrap_or_else(Cache::memory);
        let cart = CartStore::open(catalog, cache, self.config.storage_key.as_str());

        tracing::debug!(
            key = %self.config.storage_key,
            items = cart.item_count(),
            "storefront ready"
        );

        Ok(Storefront {
            cart,
            navigator: Navigator::new(
                self.viewport
                    .unwrap_or_else(|| Box::new(NoopViewport)),
            ),
            notifications: NotificationChannel::new(self.config.notification_timing()),
            checkout: CheckoutOrchestrator::new(
                self.config.pricing(),
                self.config.checkout_redirect(),
            ),
            timers: Timers::new(),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            cart_open: false,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }
}

/// Owns all session state: cart, page, notification, cart drawer and timers.
///
/// State only changes through [`dispatch`](Self::dispatch) and
/// [`advance`](Self::advance). After each change every subscribed observer
/// receives a fresh [`StorefrontView`].
///
/// # Example
///
/// ```rust
/// use alura_app::prelude::*;
/// use alura_commerce::ProductId;
///
/// let mut storefront = Storefront::builder(StorefrontConfig::default()).build()?;
/// storefront.dispatch(Action::AddToCart(ProductId::new(101)));
///
/// let view = storefront.view();
/// assert_eq!(view.item_count, 1);
/// assert_eq!(view.notification.unwrap().message, "Item added to bag.");
/// # Ok::<(), alura_app::AppError>(())
/// ```
pub struct Storefront {
    cart: CartStore,
    navigator: Navigator,
    notifications: NotificationChannel,
    checkout: CheckoutOrchestrator,
    timers: Timers,
    clock: Box<dyn Clock + Send>,
    cart_open: bool,
    observers: Vec<(SubscriptionId, Box<dyn StorefrontObserver>)>,
    next_subscription: u64,
}

impl Storefront {
    pub fn builder(config: StorefrontConfig) -> StorefrontBuilder {
        StorefrontBuilder::new(config)
    }

    /// Apply an action.
    ///
    /// Timers that came due before the action are run first, so the action
    /// sees the same state a shopper would.
    pub fn dispatch(&mut self, action: Action) -> Dispatched {
        let now = self.clock.now();
        let mut changed = self.run_due(now) > 0;

        let mut result = Dispatched::default();
        tracing::trace!(?action, "dispatch");

        match action {
            Action::AddToCart(id) => {
                if self.cart.catalog().contains(id) {
                    self.cart.add_item(id);
                    self.notifications
                        .show(ITEM_ADDED, NotificationKind::Success, &mut self.timers, now);
                    result.changed = true;
                }
            }
            Action::UpdateQuantity { id, delta } => {
                result.changed = self.cart.update_quantity(id, delta);
            }
            Action::ClearCart => {
                result.changed = !self.cart.is_empty();
                self.cart.clear();
            }
            Action::Navigate(page) => {
                self.navigator.navigate(page);
                result.changed = true;
            }
            Action::ShowNotification { message, kind } => {
                self.notifications.show(message, kind, &mut self.timers, now);
                result.changed = true;
            }
            Action::ToggleCart => {
                self.cart_open = !self.cart_open;
                result.changed = true;
            }
            Action::ProceedToCheckout => {
                if self.cart.subtotal().is_positive() {
                    self.navigator.navigate(Page::Checkout);
                    self.cart_open = false;
                    result.changed = true;
                } else {
                    tracing::debug!("checkout disabled for zero subtotal");
                }
            }
            Action::SubmitOrder { form_complete } => {
                let outcome = self.checkout.submit_order(
                    CheckoutContext {
                        page: self.navigator.current(),
                        cart: &mut self.cart,
                        notifications: &mut self.notifications,
                        timers: &mut self.timers,
                        now,
                    },
                    form_complete,
                );
                result.changed = outcome.is_submitted();
                result.checkout = Some(outcome);
            }
        }

        changed |= result.changed;
        result.changed = changed;
        if changed {
            self.notify_observers();
        }
        result
    }

    /// Run every timer due by the clock's current time.
    ///
    /// Returns the number of timer tasks that ran.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now();
        self.advance_to(now)
    }

    /// Run every timer due at `now`.
    ///
    /// Tasks run in deadline order, each seeing its own deadline as the
    /// current time, so a fade scheduled by a dismissal that was due long ago
    /// still ends on time.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let ran = self.run_due(now);
        if ran > 0 {
            self.notify_observers();
        }
        ran
    }

    /// When the next timer is due, if any.
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Current time on the storefront's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Register an observer. It is not called until the next change.
    pub fn subscribe(&mut self, observer: impl StorefrontObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Snapshot of everything there is to render.
    pub fn view(&self) -> StorefrontView {
        StorefrontView {
            page: self.navigator.current(),
            lines: self.cart.resolved_lines(),
            totals: self.totals(),
            item_count: self.cart.item_count(),
            notification: self.notifications.current().cloned(),
            cart_open: self.cart_open,
            checkout: CheckoutView::for_cart(&self.cart),
        }
    }

    pub fn page(&self) -> Page {
        self.navigator.current()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.cart.catalog()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn pricing(&self) -> &PricingPolicy {
        self.checkout.pricing()
    }

    pub fn totals(&self) -> Totals {
        self.checkout.pricing().totals(self.cart.subtotal())
    }

    fn run_due(&mut self, now: Duration) -> usize {
        let mut ran = 0;
        while let Some(due) = self.timers.pop_due(now) {
            tracing::trace!(slot = %due.slot, task = ?due.task, "timer fired");
            match due.task {
                TimerTask::DismissNotification { seq } => {
                    self.notifications
                        .begin_fade(seq, &mut self.timers, due.deadline);
                }
                TimerTask::ClearNotification { seq } => {
                    self.notifications.clear(seq);
                }
                TimerTask::NavigateHome => {
                    self.navigator.navigate(Page::Home);
                }
            }
            ran += 1;
        }
        ran
    }

    fn notify_observers(&self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for (_, observer) in &self.observers {
            observer.on_change(&view);
        }
    }
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("page", &self.navigator.current())
            .field("cart", self.cart.cart())
            .field("notification", &self.notifications.current())
            .field("cart_open", &self.cart_open)
            .field("timers", &self.timers)
            .field("observers", &self.observers.len())
            .finish()
    }
}
