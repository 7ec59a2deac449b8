//! Observability error types.

use thiserror::Error;

/// Errors raised while installing the log subscriber.
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// The filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}
