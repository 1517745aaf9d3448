//! Key-Value store wrapper with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{KvBackend, MemoryBackend};
use crate::CacheError;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and clones share the
/// same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// A cache over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Open the default Spin Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(crate::backend::SpinBackend::open_default()?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartItem>> = cache.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("@RocketShoes:cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        tracing::trace!(key, len = bytes.len(), "cache set");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        amount: u32,
    }

    #[test]
    fn test_typed_set_then_get() {
        let cache = Cache::in_memory();
        let lines = vec![Line { id: 1, amount: 2 }, Line { id: 5, amount: 1 }];

        cache.set("cart", &lines).unwrap();
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("cart").unwrap());
    }

    #[test]
    fn test_get_wrong_shape_is_serialize_error() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", br#"{"not": "a list"}"#).unwrap();

        let cache = Cache::new(backend);
        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::Codec(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();

        cache.set("k", &1u32).unwrap();
        assert_eq!(other.get::<u32>("k").unwrap(), Some(1));

        other.delete("k").unwrap();
        assert!(!cache.exists("k").unwrap());
    }
}
