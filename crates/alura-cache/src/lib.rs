//! Durable key-value storage for the Alura storefront.
//!
//! Provides a small backend trait plus a typed [`Cache`] that stores values
//! as JSON. The storefront keeps exactly one slot in it: the serialized cart.
//!
//! Backends:
//! - [`MemoryBackend`] - in-process map, shared between clones
//! - [`FileBackend`] - one file per key under a directory
//! - `SpinBackend` - Spin's Key-Value Store (wasm32 only)
//!
//! # Example
//!
//! ```rust
//! use alura_cache::{Cache, MemoryBackend};
//!
//! let cache = Cache::new(MemoryBackend::new());
//! cache.set("cart", &vec![1, 2, 3])?;
//!
//! let cart: Option<Vec<u32>> = cache.get("cart")?;
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! # Ok::<(), alura_cache::CacheError>(())
//! ```

mod backend;
mod error;
mod file;
mod kv;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use backend::{KvBackend, MemoryBackend};
pub use error::CacheError;
pub use file::FileBackend;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
