//! Raw key-value backends.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::CacheError;

/// Thread-safety required of a backend: `Send + Sync` natively, nothing on
/// `wasm32`, where Spin runs each component on a single thread.
#[cfg(not(target_arch = "wasm32"))]
pub trait BackendBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> BackendBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait BackendBounds {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> BackendBounds for T {}

/// Byte-level key-value storage.
///
/// Calls are synchronous: a `set` has either reached the backing store or
/// returned an error by the time it returns.
pub trait KvBackend: BackendBounds {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-process backend. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Single JSON file holding every key as a string value, the same shape as a
/// browser's local storage.
///
/// The file is re-read on every access so separate processes sharing it see
/// each other's writes. Writes go to a sibling temp file that is renamed over
/// the original.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    /// Use the file at `path`. The file and its parent directories are
    /// created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key).map(String::into_bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let value = std::str::from_utf8(value)
            .map_err(|e| CacheError::Backend(format!("value for {} is not UTF-8: {}", key, e)))?;

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Spin's key-value store.
#[cfg(target_arch = "wasm32")]
pub struct SpinBackend {
    store: spin_sdk::key_value::Store,
}

#[cfg(target_arch = "wasm32")]
impl SpinBackend {
    /// Open the default store.
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::Open(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::Open(e.to_string()))?;
        Ok(Self { store })
    }
}

#[cfg(target_arch = "wasm32")]
impl KvBackend for SpinBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store
            .get(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.store
            .set(key, value)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store
            .delete(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store
            .exists(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shareable<T: Send + Sync + ?Sized>() {}

    #[test]
    fn test_native_backends_are_shareable() {
        assert_shareable::<dyn KvBackend>();
        assert_shareable::<MemoryBackend>();
        assert_shareable::<FileBackend>();
        assert_shareable::<crate::Cache>();
    }

    #[test]
    fn test_memory_backend_set_get_delete() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());

        backend.set("k", b"v").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some(b"v".to_vec()));
        assert!(backend.exists("k").unwrap());

        backend.delete("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_memory_backend_delete_missing_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.delete("missing").is_ok());
    }

    #[test]
    fn test_file_backend_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("storage.json"));
        assert_eq!(backend.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileBackend::new(&path).set("@RocketShoes:cart", b"[]").unwrap();

        let reopened = FileBackend::new(&path);
        assert_eq!(reopened.get("@RocketShoes:cart").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_file_backend_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("storage.json"));

        backend.set("a", b"1").unwrap();
        backend.set("b", b"2").unwrap();
        backend.delete("a").unwrap();

        assert_eq!(backend.get("a").unwrap(), None);
        assert_eq!(backend.get("b").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_file_backend_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("storage.json"));
        let result = backend.set("k", &[0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::Backend(_))));
    }

    #[test]
    fn test_file_backend_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let backend = FileBackend::new(&path);
        assert!(matches!(backend.get("k"), Err(CacheError::Codec(_))));
    }
}
