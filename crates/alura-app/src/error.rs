//! Error types for the storefront app.

use std::path::PathBuf;

use alura_commerce::CommerceError;
use thiserror::Error;

/// Errors raised while setting up the storefront.
///
/// Nothing in this enum is produced once the storefront is running: cart
/// mutations, timers and checkout never fail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CommerceError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unknown page: {0}")]
    UnknownPage(String),
}
