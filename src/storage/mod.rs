//! KeyValueStore - durable string storage that survives restarts.
//!
//! Implementations can back this with files, browser localStorage, an
//! embedded database, and so on. All methods take `&self`; implementations
//! use interior mutability.

mod file;
mod in_memory;

use std::fmt;
use std::io;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Error type for key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    LockPoisoned(&'static str),
    /// I/O failure from the backing medium.
    Io(String),
    /// The backend refused the write (quota exceeded, read-only, ...).
    WriteRejected(String),
    /// A stored value exists but is not valid UTF-8 text.
    InvalidData(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::Io(msg) => write!(f, "storage i/o error: {}", msg),
            StorageError::WriteRejected(msg) => write!(f, "storage rejected write: {}", msg),
            StorageError::InvalidData(msg) => write!(f, "stored value is not text: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `Ok(None)` if the key has never been set and
    /// [`StorageError::InvalidData`] if the stored bytes are not UTF-8.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete a value. Succeeds if the key did not exist.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
