//! Orders domain module.
//!
//! An order is a set of products waiting to be fulfilled. The crate carries
//! only the entity; processing lives with the fulfillment engine.

pub mod order;

pub use order::Order;
