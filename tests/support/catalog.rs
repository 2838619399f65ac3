use storefront_cart::{
    CartStore, InMemoryKeyValueStore, InMemoryStockOracle, KeyValueCartRepository, Product,
    ProductId, RecordingObserver,
};

pub fn product(id: u64) -> Product {
    Product::new(
        ProductId(id),
        format!("Sneaker {}", id),
        139.9 + id as f64,
        format!("https://cdn.storefront.test/sneakers/{}.jpg", id),
    )
}

/// A store wired to in-memory collaborators, with handles kept for the test.
pub struct Shop {
    pub store: CartStore<InMemoryStockOracle, KeyValueCartRepository<InMemoryKeyValueStore>>,
    pub oracle: InMemoryStockOracle,
    pub storage: InMemoryKeyValueStore,
    pub recorder: RecordingObserver,
}

impl Shop {
    /// Open a second store over the same storage, as a new session would.
    pub fn reopen(&self) -> CartStore<InMemoryStockOracle, KeyValueCartRepository<InMemoryKeyValueStore>> {
        CartStore::open(
            self.oracle.clone(),
            KeyValueCartRepository::new(self.storage.clone()),
        )
        .unwrap()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.store.cart().iter().map(|item| item.product_id().0).collect()
    }
}

/// `stock` lists `(product id, available amount)`.
pub fn shop(stock: &[(u64, u32)]) -> Shop {
    let oracle = InMemoryStockOracle::new();
    for (id, amount) in stock {
        oracle.insert_product(product(*id), *amount);
    }
    let storage = InMemoryKeyValueStore::new();
    let recorder = RecordingObserver::new();

    let mut store =
        CartStore::open(oracle.clone(), KeyValueCartRepository::new(storage.clone())).unwrap();
    store.subscribe(recorder.clone());

    Shop {
        store,
        oracle,
        storage,
        recorder,
    }
}
