//! Storefront state container for the Alura storefront.
//!
//! [`Storefront`] owns the session: the persisted cart, the current page,
//! the single on-screen notification, the cart drawer and the timers that
//! dismiss notifications and return home after an order. The presentation
//! layer sends it [`Action`]s and renders the [`StorefrontView`] handed to
//! its [`StorefrontObserver`]s.
//!
//! Time is read from an [`alura_executor::Clock`]; nothing runs in the
//! background. Call [`Storefront::advance`] when
//! [`Storefront::next_timer_deadline`] passes.

pub mod action;
pub mod checkout;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod observer;
pub mod state;
pub mod timers;
pub mod view;

pub use action::Action;
pub use checkout::{CheckoutOrchestrator, CheckoutOutcome, CheckoutView, ORDER_CONFIRMATION};
pub use config::StorefrontConfig;
pub use error::AppError;
pub use navigation::{Navigator, NoopViewport, Page, RecordingViewport, ScrollRequest, Viewport};
pub use notification::{
    Notification, NotificationChannel, NotificationKind, NotificationPhase, NotificationTiming,
};
pub use observer::{StorefrontObserver, SubscriptionId};
pub use state::{Dispatched, Storefront, StorefrontBuilder, ITEM_ADDED};
pub use timers::{TimerSlot, TimerTask, Timers};
pub use view::StorefrontView;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::checkout::{CheckoutOutcome, CheckoutView};
    pub use crate::config::StorefrontConfig;
    pub use crate::error::AppError;
    pub use crate::navigation::{Page, ScrollRequest, Viewport};
    pub use crate::notification::{Notification, NotificationKind, NotificationPhase};
    pub use crate::observer::StorefrontObserver;
    pub use crate::state::{Dispatched, Storefront};
    pub use crate::view::StorefrontView;
}
