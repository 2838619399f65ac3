//! Notifications - user-facing outcome signals, decoupled from cart logic.
//!
//! [`CartStore`](crate::CartStore) turns each operation's result into at
//! most one [`Notification`] and hands it to every subscribed
//! [`CartObserver`]. Only which notice fired and its polarity are part of
//! the contract; the text comes from [`Messages`] and may be localized.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_cart::{CartStore, RecordingObserver};
//!
//! let recorder = RecordingObserver::new();
//! store.subscribe(recorder.clone());
//! store.subscribe(|n: &Notification| println!("{}", n.message));
//! ```

#[cfg(feature = "emitter")]
mod emitter;
mod log;
mod messages;

use serde::{Deserialize, Serialize};

use crate::product::ProductId;

#[cfg(feature = "emitter")]
pub use emitter::{EmitterObserver, FAILURE_EVENT, SUCCESS_EVENT};
pub use log::{LogObserver, LogObserverError, RecordingObserver};
pub use messages::Messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A new product was put in the cart.
    ProductAdded,
    /// Adding one more would exceed stock.
    OutOfStock,
    /// Adding failed for any other reason.
    AddFailed,
    /// Removing a product that is not in the cart.
    ProductNotFound,
    RemoveFailed,
    /// Requested amount below 1.
    InvalidQuantity,
    QuantityExceedsStock,
    /// Updating a product that is not in the cart.
    ItemNotInCart,
    /// Updating failed for any other reason.
    UpdateFailed,
}

impl Notice {
    pub fn is_success(self) -> bool {
        matches!(self, Notice::ProductAdded)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notice: Notice,
    pub product_id: ProductId,
    pub message: String,
}

impl Notification {
    pub fn is_success(&self) -> bool {
        self.notice.is_success()
    }
}

/// Receives every notification a cart store emits.
pub trait CartObserver: Send {
    fn notify(&mut self, notification: &Notification);
}

impl<F> CartObserver for F
where
    F: FnMut(&Notification) + Send,
{
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}
