mod cart;
mod config;
mod error;
mod notify;
mod oracle;
mod product;
mod repository;
mod storage;
mod store;

pub use cart::{Cart, CartInvariantError, LineItem};
pub use config::{
    CartConfig, ConfigError, HydrationPolicy, Locale, ENV_HYDRATION, ENV_LOCALE, ENV_STORAGE_KEY,
};
pub use error::{CartError, Operation};
#[cfg(feature = "emitter")]
pub use notify::{EmitterObserver, FAILURE_EVENT, SUCCESS_EVENT};
pub use notify::{
    CartObserver, LogObserver, LogObserverError, Messages, Notice, Notification,
    RecordingObserver,
};
pub use oracle::{InMemoryStockOracle, OracleError, StockOracle};
pub use product::{Product, ProductId, Stock};
pub use repository::{
    CartRepository, InMemoryCartRepository, KeyValueCartRepository, RepositoryError,
    DEFAULT_STORAGE_KEY,
};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
#[cfg(feature = "shared")]
pub use store::SharedCartStore;
pub use store::{CartStore, Change};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
