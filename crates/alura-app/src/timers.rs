//! Timer slots and the tasks scheduled in them.

use std::fmt;

use alura_executor::SlotScheduler;

/// Logical timer slots. Each holds at most one pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Notification fade and dismissal.
    Notification,
    /// Navigation back home after an order.
    CheckoutRedirect,
}

impl fmt::Display for TimerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notification => write!(f, "notification"),
            Self::CheckoutRedirect => write!(f, "checkout-redirect"),
        }
    }
}

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Start fading out notification `seq`.
    DismissNotification { seq: u64 },
    /// Remove notification `seq` once its fade is over.
    ClearNotification { seq: u64 },
    /// Return to the home page.
    NavigateHome,
}

/// The storefront's scheduler.
pub type Timers = SlotScheduler<TimerSlot, TimerTask>;
