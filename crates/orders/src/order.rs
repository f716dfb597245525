use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, OrderId};
use stockroom_products::Product;

/// Entity: Order.
///
/// Items behave as a set keyed by product id: adding a product whose id is
/// already present is a no-op, and replacement matches by id. Iteration
/// order is the insertion order, kept stable so processing and responses
/// are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    items: Vec<Product>,
}

impl Order {
    pub fn new(id: OrderId, items: Vec<Product>) -> Self {
        let mut order = Self {
            id,
            items: Vec::new(),
        };
        for item in items {
            order.add_item(item);
        }
        order
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Add a product to the order. Duplicate ids are ignored (first wins).
    pub fn add_item(&mut self, item: Product) {
        if self.items.iter().any(|p| p.id_typed() == item.id_typed()) {
            return;
        }
        self.items.push(item);
    }

    /// Swap in the updated state of an item, matched by id. Unknown ids are
    /// ignored.
    pub fn replace_item(&mut self, item: Product) {
        if let Some(slot) = self
            .items
            .iter_mut()
            .find(|p| p.id_typed() == item.id_typed())
        {
            *slot = item;
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
