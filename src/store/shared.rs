//! SharedCartStore - a cloneable handle that queues operations on one store.
//!
//! `tokio::sync::Mutex` hands out the lock in FIFO order, so overlapping
//! operations from several tasks run one after another, each against the
//! cart left by the previous one.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{CartStore, Change};
use crate::cart::Cart;
use crate::error::CartError;
use crate::notify::CartObserver;
use crate::oracle::StockOracle;
use crate::product::ProductId;
use crate::repository::CartRepository;

pub struct SharedCartStore<O, R> {
    inner: Arc<Mutex<CartStore<O, R>>>,
}

impl<O, R> Clone for SharedCartStore<O, R> {
    fn clone(&self) -> Self {
        SharedCartStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: StockOracle, R: CartRepository> SharedCartStore<O, R> {
    pub fn new(store: CartStore<O, R>) -> Self {
        SharedCartStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.lock().await.cart().clone()
    }

    pub async fn subscribe<T: CartObserver + 'static>(&self, observer: T) {
        self.inner.lock().await.subscribe(observer);
    }

    pub async fn add_product(&self, id: ProductId) -> Result<Change, CartError> {
        self.inner.lock().await.add_product(id).await
    }

    pub async fn remove_product(&self, id: ProductId) -> Result<Change, CartError> {
        self.inner.lock().await.remove_product(id)
    }

    pub async fn update_product_amount(
        &self,
        id: ProductId,
        amount: u32,
    ) -> Result<Change, CartError> {
        self.inner.lock().await.update_product_amount(id, amount).await
    }
}
