use thiserror::Error;

use std::sync::Arc;

use stockroom_core::OrderId;
use stockroom_orders::Order;
use stockroom_products::Product;

/// Storage operation error.
///
/// These are **infrastructure errors** (availability, broken references) as
/// opposed to fulfillment outcomes, which are ordinary domain results and
/// never surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store inconsistent: {0}")]
    Inconsistent(String),
}

/// Product persistence port.
///
/// ## Save Semantics
///
/// `save()` upserts by product id and returns the stored state. The engine
/// calls it for every fulfillment pass that produced a new product state,
/// including failed passes that forced stock down.
///
/// ## Design Principles
///
/// - **No storage assumptions**: works with the in-memory implementation
///   (tests/dev) and future SQL backends (production)
/// - **Synchronous**: fulfillment is CPU-bound rule evaluation; adapters that
///   need IO concurrency wrap the port themselves
pub trait ProductStore: Send + Sync {
    /// Persist the product state, returning what was stored.
    fn save(&self, product: Product) -> Result<Product, StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product)
    }
}

/// Order persistence port.
///
/// ## Hydration
///
/// Orders are stored as item links, not item snapshots. `get()` returns the
/// order with each item carrying the product's **current** stored state, so a
/// re-read after processing observes the post-fulfillment stock levels.
///
/// ## Save Semantics
///
/// `save()` upserts by order id and persists the item links. `get()` on a
/// missing id is `Ok(None)`, not an error.
pub trait OrderStore: Send + Sync {
    /// Load an order with its items hydrated from current product state.
    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Persist the order, returning what was stored.
    fn save(&self, order: Order) -> Result<Order, StoreError>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get(id)
    }

    fn save(&self, order: Order) -> Result<Order, StoreError> {
        (**self).save(order)
    }
}
