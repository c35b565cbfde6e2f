//! In-memory record store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RecordStore;
use crate::error::{Error, Result};

/// A [`RecordStore`] that keeps values in a `HashMap`.
///
/// Nothing survives the process. The store can be switched offline with
/// [`MemoryRecordStore::set_available`], after which every `get` and `set`
/// fails with [`Error::Unavailable`].
#[derive(Debug)]
pub struct MemoryRecordStore {
    values: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// Create an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Create a store with one value already present.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: Mutex::new(values),
            available: AtomicBool::new(true),
        }
    }

    /// Bring the store online or take it offline.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether the store currently accepts requests.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::unavailable("in-memory store is offline"))
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryRecordStore::new();
        assert!(store.is_available());
        assert_eq!(store.get("dogs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_value() {
        let store = MemoryRecordStore::with_value("dogs", "[]");
        assert_eq!(store.get("dogs").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryRecordStore::default();
        store.set("dogs", "one").await.unwrap();
        store.set("dogs", "two").await.unwrap();
        assert_eq!(store.get("dogs").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MemoryRecordStore::with_value("dogs", "[]");
        store.set_available(false);

        assert!(matches!(store.get("dogs").await, Err(Error::Unavailable(_))));
        assert!(matches!(
            store.set("dogs", "x").await,
            Err(Error::Unavailable(_))
        ));

        store.set_available(true);
        assert_eq!(store.get("dogs").await.unwrap().as_deref(), Some("[]"));
    }
}
