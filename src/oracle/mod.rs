//! StockOracle - read-only source of product metadata and stock levels.
//!
//! The cart never caches what the oracle returns: every mutating
//! operation asks again.

mod in_memory;

use std::fmt;

use async_trait::async_trait;

use crate::product::{Product, ProductId, Stock};

pub use in_memory::InMemoryStockOracle;

/// Failure to obtain product or stock data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The backing service could not be reached or answered with an error.
    Unavailable(String),
    /// The oracle has no record for this product.
    NotFound(ProductId),
    /// The response could not be decoded.
    Malformed(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Unavailable(msg) => write!(f, "stock oracle unavailable: {}", msg),
            OracleError::NotFound(id) => write!(f, "stock oracle has no product {}", id),
            OracleError::Malformed(msg) => write!(f, "malformed oracle response: {}", msg),
        }
    }
}

impl std::error::Error for OracleError {}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        OracleError::Malformed(err.to_string())
    }
}

#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Fetch display metadata for a product.
    async fn product(&self, id: ProductId) -> Result<Product, OracleError>;

    /// Fetch the quantity currently available for purchase.
    async fn stock(&self, id: ProductId) -> Result<Stock, OracleError>;
}

#[async_trait]
impl<T: StockOracle + ?Sized> StockOracle for std::sync::Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, OracleError> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, OracleError> {
        (**self).stock(id).await
    }
}
