//! InMemoryStockOracle - HashMap-backed catalog for tests and demos.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{OracleError, StockOracle};
use crate::product::{Product, ProductId, Stock};

#[derive(Default)]
struct Catalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    failures: HashMap<ProductId, OracleError>,
}

/// In-memory stock oracle. Clone-friendly via Arc; clones share the catalog,
/// so a test can keep a handle and change stock while a store holds another.
#[derive(Clone, Default)]
pub struct InMemoryStockOracle {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryStockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with an initial stock level.
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.insert_product(product, stock);
        self
    }

    pub fn insert_product(&self, product: Product, stock: u32) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.stock.insert(product.id, stock);
            catalog.products.insert(product.id, product);
        }
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.stock.insert(id, amount);
        }
    }

    /// Make every lookup for `id` fail with `error` until [`recover`](Self::recover).
    pub fn fail_with(&self, id: ProductId, error: OracleError) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.failures.insert(id, error);
        }
    }

    pub fn recover(&self, id: ProductId) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.failures.remove(&id);
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Catalog>, OracleError> {
        self.catalog
            .read()
            .map_err(|_| OracleError::Unavailable("catalog lock poisoned".into()))
    }
}

#[async_trait]
impl StockOracle for InMemoryStockOracle {
    async fn product(&self, id: ProductId) -> Result<Product, OracleError> {
        let catalog = self.read()?;
        if let Some(err) = catalog.failures.get(&id) {
            return Err(err.clone());
        }
        catalog
            .products
            .get(&id)
            .cloned()
            .ok_or(OracleError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, OracleError> {
        let catalog = self.read()?;
        if let Some(err) = catalog.failures.get(&id) {
            return Err(err.clone());
        }
        catalog
            .stock
            .get(&id)
            .map(|amount| Stock::new(id, *amount))
            .ok_or(OracleError::NotFound(id))
    }
}
