use std::sync::Arc;

use stockroom_core::{OrderId, ProductId};
use stockroom_infra::clock::SystemClock;
use stockroom_infra::fulfillment::{FulfillmentEngine, ProcessOrderError};
use stockroom_infra::notify::TracingNotifier;
use stockroom_infra::stores::{
    InMemoryBackend, InMemoryOrderStore, InMemoryProductStore, OrderStore, ProductStore,
    StoreError,
};
use stockroom_orders::Order;
use stockroom_products::Product;

// Engine wiring for the in-memory deployment.
type InMemoryFulfillmentEngine =
    FulfillmentEngine<InMemoryOrderStore, InMemoryProductStore, TracingNotifier, SystemClock>;

/// Application services shared across handlers.
///
/// Handlers go through these delegation methods rather than holding stores
/// directly, so swapping the backing implementations stays a one-file change.
pub struct AppServices {
    products: InMemoryProductStore,
    orders: InMemoryOrderStore,
    engine: InMemoryFulfillmentEngine,
}

impl AppServices {
    pub fn products_save(&self, product: Product) -> Result<Product, StoreError> {
        self.products.save(product)
    }

    pub fn products_get(&self, id: ProductId) -> Option<Product> {
        self.products.get(id)
    }

    pub fn products_list(&self) -> Vec<Product> {
        self.products.list()
    }

    pub fn orders_save(&self, order: Order) -> Result<Order, StoreError> {
        self.orders.save(order)
    }

    pub fn orders_get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.orders.get(id)
    }

    /// Run one fulfillment pass over the order.
    pub fn process_order(&self, id: OrderId) -> Result<Order, ProcessOrderError> {
        self.engine.process_order(id)
    }
}

/// Wire the in-memory application stack.
pub fn build_services() -> AppServices {
    let backend = Arc::new(InMemoryBackend::new());
    let products = InMemoryProductStore::new(backend.clone());
    let orders = InMemoryOrderStore::new(backend);

    let engine = FulfillmentEngine::new(
        orders.clone(),
        products.clone(),
        TracingNotifier::new(),
        SystemClock::new(),
    );

    AppServices {
        products,
        orders,
        engine,
    }
}
