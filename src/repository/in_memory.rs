//! InMemoryCartRepository - holds the saved cart directly, for tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::{CartRepository, RepositoryError};
use crate::cart::Cart;
use crate::storage::StorageError;

/// Clone-friendly via Arc; clones observe the same saved cart.
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    saved: Arc<RwLock<Option<Cart>>>,
    fail_saves: Arc<AtomicBool>,
    saves: Arc<AtomicU64>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `cart` already persisted.
    pub fn with_cart(cart: Cart) -> Self {
        let repo = Self::new();
        if let Ok(mut saved) = repo.saved.write() {
            *saved = Some(cart);
        }
        repo
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved cart.
    pub fn saved(&self) -> Option<Cart> {
        self.saved.read().ok().and_then(|saved| saved.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CartRepository for InMemoryCartRepository {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        let saved = self
            .saved
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("load"))?;
        Ok(saved.as_ref().map(Cart::reloaded))
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage(StorageError::WriteRejected(
                "saves disabled".into(),
            )));
        }
        let mut saved = self
            .saved
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("save"))?;
        *saved = Some(cart.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
