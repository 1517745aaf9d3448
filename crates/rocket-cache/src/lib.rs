//! Typed key-value persistence for RocketCart.
//!
//! A [`Cache`] stores JSON-serialized values under string keys in a
//! [`KvBackend`]. Backends:
//!
//! - [`MemoryBackend`] for tests and ephemeral sessions
//! - [`FileBackend`] for a local-storage style JSON file on disk
//! - `SpinBackend` for Spin's Key-Value Store (`wasm32` only)
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cache::{Cache, FileBackend};
//! use std::sync::Arc;
//!
//! let cache = Cache::new(Arc::new(FileBackend::new(".rocketcart/storage.json")));
//!
//! cache.set("@RocketShoes:cart", &items)?;
//! let items: Option<Vec<CartItem>> = cache.get("@RocketShoes:cart")?;
//! ```

mod backend;
mod error;
mod kv;

#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use backend::{BackendBounds, FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
