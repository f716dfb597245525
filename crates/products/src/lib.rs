//! Products domain module.
//!
//! This crate contains the per-category fulfillment rules for products,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod product;

pub use product::{FulfillmentOutcome, Notification, Product, ProductCategory};
