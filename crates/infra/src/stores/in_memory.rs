use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockroom_core::{OrderId, ProductId};
use stockroom_orders::Order;
use stockroom_products::Product;

use super::r#trait::{OrderStore, ProductStore, StoreError};

/// Stored form of an order: item links only. Items are hydrated from the
/// product table on read, so loads always see current stock.
#[derive(Debug, Clone)]
struct OrderRecord {
    item_ids: Vec<ProductId>,
}

#[derive(Debug, Default)]
struct State {
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, OrderRecord>,
}

/// Shared in-memory tables backing both stores.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stored state of one product. `None` when absent.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        let state = self.state.read().ok()?;
        state.products.get(&id).cloned()
    }

    /// All stored products. Poisoned-lock reads degrade to an empty list.
    pub fn products(&self) -> Vec<Product> {
        self.state
            .read()
            .map(|state| state.products.values().cloned().collect())
            .unwrap_or_default()
    }

    fn save_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        state.products.insert(product.id_typed(), product.clone());
        Ok(product)
    }

    fn load_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let Some(record) = state.orders.get(&id) else {
            return Ok(None);
        };

        let mut items = Vec::with_capacity(record.item_ids.len());
        for product_id in &record.item_ids {
            let product = state.products.get(product_id).cloned().ok_or_else(|| {
                StoreError::Inconsistent(format!(
                    "order {id} references unknown product {product_id}"
                ))
            })?;
            items.push(product);
        }

        Ok(Some(Order::new(id, items)))
    }

    fn save_order(&self, order: Order) -> Result<Order, StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let record = OrderRecord {
            item_ids: order.items().iter().map(|p| p.id_typed()).collect(),
        };
        state.orders.insert(order.id_typed(), record);
        Ok(order)
    }
}

/// Product store handle over a shared [`InMemoryBackend`].
///
/// The trait covers writes; `get`/`list` are inherent reads for adapters that
/// hold the concrete store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    backend: Arc<InMemoryBackend>,
}

impl InMemoryProductStore {
    pub fn new(backend: Arc<InMemoryBackend>) -> Self {
        Self { backend }
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.backend.product(id)
    }

    pub fn list(&self) -> Vec<Product> {
        self.backend.products()
    }
}

impl ProductStore for InMemoryProductStore {
    fn save(&self, product: Product) -> Result<Product, StoreError> {
        self.backend.save_product(product)
    }
}

/// Order store handle over a shared [`InMemoryBackend`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    backend: Arc<InMemoryBackend>,
}

impl InMemoryOrderStore {
    pub fn new(backend: Arc<InMemoryBackend>) -> Self {
        Self { backend }
    }
}

impl OrderStore for InMemoryOrderStore {
    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.backend.load_order(id)
    }

    fn save(&self, order: Order) -> Result<Order, StoreError> {
        self.backend.save_order(order)
    }
}
