//! Logging setup for the Alura storefront.
//!
//! Library crates emit `tracing` events; binaries call [`init_logging`] once
//! to install a subscriber that writes them to stderr as human-readable
//! lines or JSON.

mod error;
mod logging;

pub use error::ObservabilityError;
pub use logging::*;
