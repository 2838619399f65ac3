//! CartRepository - load and save the whole cart.
//!
//! The cart is stored as one value: every save overwrites the previous one
//! (last writer wins, no merge).

mod in_memory;
mod key_value;

use std::fmt;

use crate::cart::{Cart, CartInvariantError};
use crate::storage::StorageError;

pub use in_memory::InMemoryCartRepository;
pub use key_value::{KeyValueCartRepository, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    LockPoisoned(&'static str),
    /// The underlying key-value store failed.
    Storage(StorageError),
    /// The cart could not be encoded.
    Serde(String),
    /// Persisted data exists but is not a valid cart.
    Corrupt(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::LockPoisoned(operation) => {
                write!(f, "repository lock poisoned during {}", operation)
            }
            RepositoryError::Storage(err) => write!(f, "cart storage error: {}", err),
            RepositoryError::Serde(msg) => write!(f, "cart serialization error: {}", msg),
            RepositoryError::Corrupt(msg) => write!(f, "persisted cart is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for RepositoryError {
    fn from(err: StorageError) -> Self {
        RepositoryError::Storage(err)
    }
}

impl From<CartInvariantError> for RepositoryError {
    fn from(err: CartInvariantError) -> Self {
        RepositoryError::Corrupt(err.to_string())
    }
}

pub trait CartRepository: Send + Sync {
    /// Load the persisted cart. Returns `Ok(None)` if nothing has been saved.
    fn load(&self) -> Result<Option<Cart>, RepositoryError>;

    /// Persist the full cart, replacing whatever was stored.
    fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

impl<T: CartRepository + ?Sized> CartRepository for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        (**self).save(cart)
    }
}
