//! Persistence boundary for products and orders.
//!
//! This module defines infrastructure-facing storage ports without making any
//! storage assumptions, plus the in-memory implementation both the engine
//! tests and the dev server run on.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryBackend, InMemoryOrderStore, InMemoryProductStore};
pub use r#trait::{OrderStore, ProductStore, StoreError};
