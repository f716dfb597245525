//! Entity trait: identity + continuity across state changes.
//!
//! Products and orders are entities: a product whose stock was adjusted is
//! still the same product, and order item collections deduplicate by id, not
//! by field equality.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
