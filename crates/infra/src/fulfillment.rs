//! Order processing pipeline (application-level orchestration).
//!
//! This module implements the fulfillment pass over an order. It orchestrates
//! the full lifecycle: loading the order, applying each item's category rule,
//! persisting the resulting state, and delivering notifications.
//!
//! ## Processing Flow
//!
//! The `FulfillmentEngine` implements this pipeline for each item:
//!
//! ```text
//! Order id
//!   ↓
//! 1. Load order from store (items hydrated to current stock)
//!   ↓
//! 2. Read today's date from the clock
//!   ↓
//! 3. Apply the item's category rule (pure decision logic)
//!   ↓
//! 4. Persist the resulting product state (skipped for untouched items)
//!   ↓
//! 5. Deliver the notification, if the rule raised one
//!   ↓
//! 6. Persist the order
//! ```
//!
//! ## Design Principles
//!
//! - **No IO assumptions**: composes the store, notifier, and clock traits;
//!   works with in-memory implementations and real backends alike
//! - **Persist before notify**: a notification is delivered only once the
//!   product state that caused it has been stored, for every category
//! - **Per-item isolation**: one item's rule never reads another item, and
//!   an unfulfillable item does not stop the pass; only store failures abort
//!
//! This module contains no IO itself; it composes infrastructure traits.

use stockroom_core::{Entity, OrderId};
use stockroom_orders::Order;
use stockroom_products::FulfillmentOutcome;

use crate::clock::Clock;
use crate::notify::Notifier;
use crate::stores::{OrderStore, ProductStore, StoreError};

#[derive(Debug)]
pub enum ProcessOrderError {
    /// No order with the requested id exists.
    OrderNotFound(OrderId),
    /// Persistence failed (store unavailable or holding broken references).
    Store(StoreError),
}

impl From<StoreError> for ProcessOrderError {
    fn from(value: StoreError) -> Self {
        ProcessOrderError::Store(value)
    }
}

/// Reusable fulfillment pass over the items of one order.
///
/// ## Architecture Role
///
/// The engine sits between the API layer (HTTP handlers) and the
/// infrastructure layer (stores, notifier, clock). Rule decisions stay on
/// [`stockroom_products::Product`]; the engine contributes the orchestration:
/// what gets loaded, what gets persisted, what gets delivered, in which order.
///
/// ## Error Semantics
///
/// - **Unknown order id** → `ProcessOrderError::OrderNotFound`, before any
///   side effect
/// - **Store failure** → `ProcessOrderError::Store`; the pass stops where it
///   was, items already persisted stay persisted
/// - **Unfulfillable items** are ordinary outcomes, never errors
///
/// ## Concurrency
///
/// The engine takes no cross-order lock. Processing two orders that share a
/// product concurrently races on the product write (read-modify-write), and
/// the in-memory store resolves that race last-write-wins. Callers that need
/// strict stock accuracy must serialize processing per product.
///
/// ## Generic Parameters
///
/// - `O`: order store implementation
/// - `P`: product store implementation
/// - `N`: notification sink
/// - `C`: calendar date source
#[derive(Debug)]
pub struct FulfillmentEngine<O, P, N, C> {
    orders: O,
    products: P,
    notifier: N,
    clock: C,
}

impl<O, P, N, C> FulfillmentEngine<O, P, N, C> {
    pub fn new(orders: O, products: P, notifier: N, clock: C) -> Self {
        Self {
            orders,
            products,
            notifier,
            clock,
        }
    }
}

impl<O, P, N, C> FulfillmentEngine<O, P, N, C>
where
    O: OrderStore,
    P: ProductStore,
    N: Notifier,
    C: Clock,
{
    /// Run one fulfillment pass over the order's items.
    ///
    /// Each item is put through its category rule against today's date. The
    /// resulting product state is persisted and the rule's notification, if
    /// any, delivered, item by item. Untouched items are neither persisted
    /// nor announced. The order itself is persisted once at the end and
    /// returned with its items reflecting the new stock levels.
    ///
    /// Re-running the pass is legitimate: rules only see current state, so a
    /// second pass re-applies the rules to whatever stock is left.
    pub fn process_order(&self, id: OrderId) -> Result<Order, ProcessOrderError> {
        let mut order = self
            .orders
            .get(id)?
            .ok_or(ProcessOrderError::OrderNotFound(id))?;
        let today = self.clock.today();

        let mut reserved = 0u32;
        let mut unfulfilled = 0u32;
        let mut skipped = 0u32;

        for item in order.items().to_vec() {
            match item.fulfill(today) {
                FulfillmentOutcome::Reserved { product } => {
                    let saved = self.products.save(product)?;
                    order.replace_item(saved);
                    reserved += 1;
                }
                FulfillmentOutcome::Unfulfilled {
                    product,
                    notification,
                } => {
                    let saved = self.products.save(product)?;
                    order.replace_item(saved);
                    if let Some(notification) = &notification {
                        self.notifier.send(notification);
                    }
                    unfulfilled += 1;
                }
                FulfillmentOutcome::Untouched => {
                    skipped += 1;
                }
            }
        }

        let order = self.orders.save(order)?;

        tracing::info!(
            order_id = %order.id(),
            reserved,
            unfulfilled,
            skipped,
            "order processed"
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::{Duration, NaiveDate};

    use stockroom_core::ProductId;
    use stockroom_products::{Notification, Product, ProductCategory};

    use crate::clock::FixedClock;
    use crate::notify::InMemoryNotifier;
    use crate::stores::{InMemoryBackend, InMemoryOrderStore, InMemoryProductStore};

    use super::*;

    type TestEngine =
        FulfillmentEngine<InMemoryOrderStore, InMemoryProductStore, Arc<InMemoryNotifier>, FixedClock>;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        fixed_today() + Duration::days(offset)
    }

    fn seeded_engine(
        products: Vec<Product>,
    ) -> (TestEngine, Arc<InMemoryBackend>, Arc<InMemoryNotifier>, OrderId) {
        let backend = Arc::new(InMemoryBackend::new());
        let product_store = InMemoryProductStore::new(backend.clone());
        let order_store = InMemoryOrderStore::new(backend.clone());
        let notifier = Arc::new(InMemoryNotifier::new());

        let mut items = Vec::new();
        for product in products {
            items.push(product_store.save(product).unwrap());
        }
        let order_id = OrderId::new();
        order_store
            .save(Order::new(order_id, items))
            .unwrap();

        let engine = FulfillmentEngine::new(
            order_store,
            product_store,
            notifier.clone(),
            FixedClock::new(fixed_today()),
        );
        (engine, backend, notifier, order_id)
    }

    fn cable(id: ProductId, units: u32) -> Product {
        Product::new(id, "USB Cable", units, ProductCategory::Normal { lead_time_days: 15 })
            .unwrap()
    }

    #[test]
    fn unknown_order_fails_without_side_effects() {
        let cable_id = ProductId::new();
        let (engine, backend, notifier, _) = seeded_engine(vec![cable(cable_id, 30)]);

        let missing = OrderId::new();
        let err = engine.process_order(missing).unwrap_err();

        match err {
            ProcessOrderError::OrderNotFound(id) => assert_eq!(id, missing),
            other => panic!("expected OrderNotFound, got {other:?}"),
        }
        assert!(notifier.all().is_empty());
        assert_eq!(backend.product(cable_id).unwrap().units_available(), 30);
    }

    #[test]
    fn processes_each_item_with_its_category_rule() {
        let cable_id = ProductId::new();
        let milk_id = ProductId::new();
        let milk = Product::new(
            milk_id,
            "Milk",
            6,
            ProductCategory::Expirable { expiry_date: day(-2) },
        )
        .unwrap();
        let (engine, backend, notifier, order_id) =
            seeded_engine(vec![cable(cable_id, 30), milk]);

        let processed = engine.process_order(order_id).unwrap();

        assert_eq!(processed.items().len(), 2);
        assert_eq!(backend.product(cable_id).unwrap().units_available(), 29);
        assert_eq!(backend.product(milk_id).unwrap().units_available(), 0);
        assert_eq!(
            notifier.all(),
            vec![Notification::Expired {
                product_name: "Milk".to_string(),
                expiry_date: day(-2),
            }]
        );
    }

    #[test]
    fn processed_order_rereads_with_current_stock() {
        let cable_id = ProductId::new();
        let (engine, backend, _, order_id) = seeded_engine(vec![cable(cable_id, 30)]);

        engine.process_order(order_id).unwrap();

        let reread = InMemoryOrderStore::new(backend)
            .get(order_id)
            .unwrap()
            .unwrap();
        assert_eq!(reread.items()[0].units_available(), 29);
    }

    #[test]
    fn flash_sale_failure_is_terminal_across_passes() {
        let flash_id = ProductId::new();
        let flash = Product::new(
            flash_id,
            "Flash Sale Product",
            30,
            ProductCategory::FlashSale {
                season_start_date: day(-14),
                season_end_date: day(-7),
            },
        )
        .unwrap();
        let (engine, backend, notifier, order_id) = seeded_engine(vec![flash]);

        engine.process_order(order_id).unwrap();
        engine.process_order(order_id).unwrap();

        assert_eq!(backend.product(flash_id).unwrap().units_available(), 0);
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn unknown_category_items_are_not_persisted() {
        struct CountingProductStore {
            inner: InMemoryProductStore,
            saves: AtomicU32,
        }

        impl ProductStore for CountingProductStore {
            fn save(&self, product: Product) -> Result<Product, StoreError> {
                self.saves.fetch_add(1, Ordering::SeqCst);
                self.inner.save(product)
            }
        }

        let backend = Arc::new(InMemoryBackend::new());
        let inner = InMemoryProductStore::new(backend.clone());
        let order_store = InMemoryOrderStore::new(backend.clone());
        let notifier = Arc::new(InMemoryNotifier::new());

        let mystery_id = ProductId::new();
        let cable_id = ProductId::new();
        let mystery = inner
            .save(Product::new(mystery_id, "Mystery Box", 5, ProductCategory::Unknown).unwrap())
            .unwrap();
        let seeded_cable = inner.save(cable(cable_id, 30)).unwrap();

        let order_id = OrderId::new();
        order_store
            .save(Order::new(order_id, vec![mystery, seeded_cable]))
            .unwrap();

        let counting = Arc::new(CountingProductStore {
            inner,
            saves: AtomicU32::new(0),
        });
        let engine = FulfillmentEngine::new(
            order_store,
            counting.clone(),
            notifier.clone(),
            FixedClock::new(fixed_today()),
        );

        engine.process_order(order_id).unwrap();

        // Only the cable went through the store; the unknown item stayed put.
        assert_eq!(counting.saves.load(Ordering::SeqCst), 1);
        assert_eq!(backend.product(mystery_id).unwrap().units_available(), 5);
        assert_eq!(backend.product(cable_id).unwrap().units_available(), 29);
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn store_failure_aborts_the_pass() {
        struct FailingProductStore;

        impl ProductStore for FailingProductStore {
            fn save(&self, _product: Product) -> Result<Product, StoreError> {
                Err(StoreError::Unavailable("backend down".to_string()))
            }
        }

        let backend = Arc::new(InMemoryBackend::new());
        let product_store = InMemoryProductStore::new(backend.clone());
        let order_store = InMemoryOrderStore::new(backend.clone());

        let cable_id = ProductId::new();
        let seeded = product_store.save(cable(cable_id, 30)).unwrap();
        let order_id = OrderId::new();
        order_store.save(Order::new(order_id, vec![seeded])).unwrap();

        let engine = FulfillmentEngine::new(
            order_store,
            FailingProductStore,
            Arc::new(InMemoryNotifier::new()),
            FixedClock::new(fixed_today()),
        );

        let err = engine.process_order(order_id).unwrap_err();
        match err {
            ProcessOrderError::Store(StoreError::Unavailable(_)) => {}
            other => panic!("expected Store(Unavailable), got {other:?}"),
        }
        // The failed write never landed.
        assert_eq!(backend.product(cable_id).unwrap().units_available(), 30);
    }
}
