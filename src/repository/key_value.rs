//! KeyValueCartRepository - the cart as a JSON array under one key.

use tracing::debug;

use super::{CartRepository, RepositoryError};
use crate::cart::{Cart, LineItem};
use crate::config::CartConfig;
use crate::storage::{KeyValueStore, StorageError};

pub const DEFAULT_STORAGE_KEY: &str = "@storefront:cart";

/// Typed cart repository over any [`KeyValueStore`].
pub struct KeyValueCartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueCartRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        KeyValueCartRepository {
            store,
            key: key.into(),
        }
    }

    pub fn from_config(store: S, config: &CartConfig) -> Self {
        Self::with_key(store, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> CartRepository for KeyValueCartRepository<S> {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageError::InvalidData(reason)) => return Err(RepositoryError::Corrupt(reason)),
            Err(err) => return Err(err.into()),
        };

        let items: Vec<LineItem> =
            serde_json::from_str(&raw).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
        let cart = Cart::from_items(items)?;
        debug!(key = %self.key, items = cart.len(), "loaded cart");
        Ok(Some(cart))
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(cart).map_err(|e| RepositoryError::Serde(e.to_string()))?;
        self.store.set(&self.key, json)?;
        debug!(key = %self.key, items = cart.len(), "saved cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Product, ProductId};
    use crate::storage::InMemoryKeyValueStore;

    fn cart_with(ids: &[u64]) -> Cart {
        let mut cart = Cart::new();
        for id in ids {
            cart.push(Product::new(ProductId(*id), format!("P{}", id), 10.0, "p.jpg")).unwrap();
        }
        cart
    }

    #[test]
    fn absent_key_loads_none() {
        let repo = KeyValueCartRepository::new(InMemoryKeyValueStore::new());
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let store = InMemoryKeyValueStore::new();
        let repo = KeyValueCartRepository::new(store.clone());
        let mut cart = cart_with(&[2, 1]);
        cart.set_amount(ProductId(1), 3);

        repo.save(&cart).unwrap();
        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.items(), cart.items());

        let raw = store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
    }

    #[test]
    fn custom_key_is_used() {
        let store = InMemoryKeyValueStore::new();
        let repo = KeyValueCartRepository::with_key(store.clone(), "@shop:cart");
        repo.save(&cart_with(&[1])).unwrap();

        assert!(store.get("@shop:cart").unwrap().is_some());
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn bad_json_is_corrupt() {
        let store = InMemoryKeyValueStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{not json".into()).unwrap();
        let repo = KeyValueCartRepository::new(store);
        assert!(matches!(repo.load(), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let store = InMemoryKeyValueStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":1,"title":"a","price":1,"image":"a","amount":1},
                    {"id":1,"title":"a","price":1,"image":"a","amount":2}]"#
                    .into(),
            )
            .unwrap();
        let repo = KeyValueCartRepository::new(store);
        assert!(matches!(repo.load(), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn storage_failure_surfaces() {
        let store = InMemoryKeyValueStore::new();
        store.fail_writes(true);
        let repo = KeyValueCartRepository::new(store);
        let err = repo.save(&cart_with(&[1])).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Storage(StorageError::WriteRejected(_))
        ));
    }
}
