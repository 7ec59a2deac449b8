//! Slot-keyed cancelable timers.
//!
//! This crate provides:
//! - `Clock` - Time source measured from a fixed origin
//! - `SystemClock` / `ManualClock` - Real and test-driven clocks
//! - `SlotScheduler` - One pending task per logical slot; scheduling into an
//!   occupied slot supersedes the earlier task

mod clock;
mod scheduler;

pub use clock::*;
pub use scheduler::*;
