//! InMemoryKeyValueStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// In-memory key-value store. Clone-friendly via Arc; clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
    reject_writes: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, every `set` and `remove` fails with
    /// [`StorageError::WriteRejected`]. Reads keep working.
    pub fn fail_writes(&self, fail: bool) {
        self.reject_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected("writes disabled".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        storage.remove(key);
        Ok(())
    }
}
