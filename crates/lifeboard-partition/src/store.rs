//! Key-value partition storage
//!
//! A [`PartitionStore`] holds one JSON array per key. There is no multi-key
//! transaction: each `set` stands alone, and a later `set` to the same key
//! fully replaces the earlier bytes.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::StoreResult;

/// Byte storage keyed by partition name
///
/// Implementations use interior mutability so a single store can be shared by
/// the reconciler and the writer.
pub trait PartitionStore: Send + Sync {
    /// Read the raw bytes of a partition, `None` if it was never written
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replace the raw bytes of a partition
    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
}

impl<S: PartitionStore + ?Sized> PartitionStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).set(key, bytes)
    }
}

impl<S: PartitionStore + ?Sized> PartitionStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).set(key, bytes)
    }
}

impl<S: PartitionStore + ?Sized> PartitionStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).set(key, bytes)
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a partition with raw text (may be malformed on purpose)
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<Vec<u8>>) {
        self.inner.write().insert(key.into(), raw.into());
    }

    /// Raw text of a partition, lossily decoded
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Keys written so far
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }

    /// Check if key was ever written
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }
}

impl PartitionStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.inner.read().get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.inner.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get("nothing").unwrap().is_none());
        assert!(!store.contains("nothing"));
    }

    #[test]
    fn memory_store_set_replaces() {
        let store = MemoryStore::new();
        store.set("k", b"[1]").unwrap();
        store.set("k", b"[2]").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"[2]".to_vec());
        assert_eq!(store.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let handle: Arc<dyn PartitionStore> = store.clone();
        handle.set("k", b"[]").unwrap();
        assert_eq!(store.raw("k").as_deref(), Some("[]"));
    }
}
