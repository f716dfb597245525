//! Infrastructure layer: storage ports, the fulfillment engine, notification
//! and clock adapters.

pub mod clock;
pub mod fulfillment;
pub mod notify;
pub mod stores;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fulfillment::{FulfillmentEngine, ProcessOrderError};
pub use notify::{InMemoryNotifier, Notifier, TracingNotifier};
pub use stores::{InMemoryBackend, InMemoryOrderStore, InMemoryProductStore};
