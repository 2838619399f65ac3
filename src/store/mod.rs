//! CartStore - the cart state machine.
//!
//! Per product the cart moves `absent → present(1) → present(k)`, gated by a
//! fresh stock check each time, and back to `absent` on removal.
//!
//! Every operation returns a typed [`Change`] or [`CartError`] and, where the
//! outcome is user-visible, hands one [`Notification`] to each observer.
//! Mutations are applied to a copy and saved first; the in-memory cart is
//! replaced only once the save succeeds.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_cart::{CartStore, InMemoryStockOracle, KeyValueCartRepository, InMemoryKeyValueStore};
//!
//! let repo = KeyValueCartRepository::new(InMemoryKeyValueStore::new());
//! let mut store = CartStore::open(oracle, repo)?;
//! store.add_product(ProductId(1)).await?;
//! store.update_product_amount(ProductId(1), 3).await?;
//! store.remove_product(ProductId(1))?;
//! ```

#[cfg(feature = "shared")]
mod shared;

use tracing::{debug, info, warn};

use crate::cart::{Cart, LineItem};
use crate::config::{CartConfig, HydrationPolicy};
use crate::error::{CartError, Operation};
use crate::notify::{CartObserver, Messages, Notice, Notification};
use crate::oracle::StockOracle;
use crate::product::ProductId;
use crate::repository::{CartRepository, RepositoryError};

#[cfg(feature = "shared")]
pub use shared::SharedCartStore;

/// What a successful operation did to the cart.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    /// A product not previously in the cart was added with amount 1.
    Added(LineItem),
    /// An existing line item's amount went up by one.
    Incremented { product_id: ProductId, amount: u32 },
    /// The product is not in the cart and has no stock. Nothing changed and
    /// nothing is signalled.
    Unavailable { product_id: ProductId },
    Removed(LineItem),
    AmountSet { product_id: ProductId, amount: u32 },
}

impl Change {
    pub fn product_id(&self) -> ProductId {
        match self {
            Change::Added(item) | Change::Removed(item) => item.product_id(),
            Change::Incremented { product_id, .. }
            | Change::Unavailable { product_id }
            | Change::AmountSet { product_id, .. } => *product_id,
        }
    }

    /// Whether the cart was modified (and persisted).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Change::Unavailable { .. })
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            Change::Added(_) => Some(Notice::ProductAdded),
            _ => None,
        }
    }
}

pub struct CartStore<O, R> {
    oracle: O,
    repository: R,
    cart: Cart,
    messages: Messages,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<O: StockOracle, R: CartRepository> CartStore<O, R> {
    /// Hydrate from `repository` with the default config.
    pub fn open(oracle: O, repository: R) -> Result<Self, RepositoryError> {
        Self::open_with(oracle, repository, CartConfig::default())
    }

    pub fn open_with(oracle: O, repository: R, config: CartConfig) -> Result<Self, RepositoryError> {
        let cart = hydrate(&repository, config.hydration)?;
        debug!(items = cart.len(), "cart store opened");
        Ok(CartStore {
            oracle,
            repository,
            cart,
            messages: Messages::new(config.locale),
            observers: Vec::new(),
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn messages(&self) -> Messages {
        self.messages
    }

    /// Register an observer. Observers are called in subscription order.
    pub fn subscribe<T: CartObserver + 'static>(&mut self, observer: T) {
        self.observers.push(Box::new(observer));
    }

    /// Put one more unit of a product in the cart.
    ///
    /// A product not yet in the cart is added with amount 1 if any stock
    /// exists, and silently skipped ([`Change::Unavailable`]) if none does.
    /// A product already in the cart is incremented only while stock exceeds
    /// its current amount.
    pub async fn add_product(&mut self, id: ProductId) -> Result<Change, CartError> {
        let result = self.try_add(id).await;
        self.report(Operation::Add, id, &result);
        result
    }

    async fn try_add(&mut self, id: ProductId) -> Result<Change, CartError> {
        let current = self.cart.get(id).map(|item| item.amount);
        debug!(product_id = %id, ?current, "add product");

        match current {
            None => {
                let product = self.oracle.product(id).await?;
                let stock = self.oracle.stock(id).await?;
                if !stock.is_available() {
                    debug!(product_id = %id, "no stock for new product, skipping");
                    return Ok(Change::Unavailable { product_id: id });
                }

                let mut next = self.cart.clone();
                let item = next.push(product)?.clone();
                self.commit(next)?;
                info!(product_id = %id, available = stock.amount, "product added to cart");
                Ok(Change::Added(item))
            }
            Some(amount) => {
                let stock = self.oracle.stock(id).await?;
                if stock.amount <= amount {
                    return Err(CartError::StockExceeded {
                        product_id: id,
                        requested: amount.saturating_add(1),
                        available: stock.amount,
                    });
                }

                let amount = amount + 1;
                let mut next = self.cart.clone();
                if !next.set_amount(id, amount) {
                    return Err(CartError::NotFound { product_id: id });
                }
                self.commit(next)?;
                debug!(product_id = %id, amount, available = stock.amount, "product incremented");
                Ok(Change::Incremented {
                    product_id: id,
                    amount,
                })
            }
        }
    }

    /// Take a product out of the cart entirely.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Change, CartError> {
        let result = self.try_remove(id);
        self.report(Operation::Remove, id, &result);
        result
    }

    fn try_remove(&mut self, id: ProductId) -> Result<Change, CartError> {
        debug!(product_id = %id, "remove product");
        let mut next = self.cart.clone();
        let removed = next
            .remove(id)
            .ok_or(CartError::NotFound { product_id: id })?;
        self.commit(next)?;
        Ok(Change::Removed(removed))
    }

    /// Set a product's amount to exactly `amount`.
    ///
    /// Checks run in order: amount ≥ 1, amount within current stock, product
    /// present in the cart. The stock is fetched even when the product turns
    /// out to be absent.
    pub async fn update_product_amount(
        &mut self,
        id: ProductId,
        amount: u32,
    ) -> Result<Change, CartError> {
        let result = self.try_update(id, amount).await;
        self.report(Operation::Update, id, &result);
        result
    }

    async fn try_update(&mut self, id: ProductId, amount: u32) -> Result<Change, CartError> {
        debug!(product_id = %id, amount, "update product amount");
        if amount < 1 {
            return Err(CartError::Validation { amount });
        }

        let stock = self.oracle.stock(id).await?;
        if amount > stock.amount {
            return Err(CartError::StockExceeded {
                product_id: id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut next = self.cart.clone();
        if !next.set_amount(id, amount) {
            return Err(CartError::NotFound { product_id: id });
        }
        self.commit(next)?;
        Ok(Change::AmountSet {
            product_id: id,
            amount,
        })
    }

    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        self.repository.save(&next)?;
        self.cart = next;
        Ok(())
    }

    fn report(&mut self, operation: Operation, id: ProductId, result: &Result<Change, CartError>) {
        let notice = match result {
            Ok(change) => change.notice(),
            Err(err) => {
                warn!(%operation, product_id = %id, error = %err, "cart operation failed");
                Some(err.notice(operation))
            }
        };

        if let Some(notice) = notice {
            let notification = Notification {
                notice,
                product_id: id,
                message: self.messages.render(notice).to_string(),
            };
            for observer in self.observers.iter_mut() {
                observer.notify(&notification);
            }
        }
    }
}

fn hydrate<R: CartRepository>(
    repository: &R,
    policy: HydrationPolicy,
) -> Result<Cart, RepositoryError> {
    match repository.load() {
        Ok(Some(cart)) => Ok(cart),
        Ok(None) => Ok(Cart::new()),
        Err(RepositoryError::Corrupt(reason)) if policy == HydrationPolicy::DefaultEmpty => {
            warn!(%reason, "persisted cart is corrupt, starting with an empty cart");
            Ok(Cart::new())
        }
        Err(err) => Err(err),
    }
}
