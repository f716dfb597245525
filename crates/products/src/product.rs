use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

/// Product classification driving the fulfillment rule.
///
/// Each variant carries exactly the data its rule reads, so a product can
/// never sit in a category while missing that category's fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Ordinary stocked goods with a restock lead time.
    Normal { lead_time_days: u32 },
    /// Sellable only strictly inside the season window.
    Seasonal {
        season_start_date: NaiveDate,
        season_end_date: NaiveDate,
    },
    /// Spoils once the expiry date is reached.
    Expirable { expiry_date: NaiveDate },
    /// Sellable only strictly inside the sale window; sells out silently.
    FlashSale {
        season_start_date: NaiveDate,
        season_end_date: NaiveDate,
    },
    /// Category outside the known set. No rule applies.
    Unknown,
}

/// Notification raised when a product cannot be fulfilled.
///
/// Values only; delivery is a collaborator concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    OutOfStock {
        product_name: String,
    },
    Expired {
        product_name: String,
        expiry_date: NaiveDate,
    },
    RestockDelay {
        lead_time_days: u32,
        product_name: String,
    },
}

/// What a fulfillment pass decided for one product.
///
/// Rules are pure: they return the would-be product state plus the
/// notification to raise. The caller persists and delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    /// One unit reserved; the updated product must be persisted.
    Reserved { product: Product },
    /// Nothing reserved; the product (stock may have been forced down) must
    /// be persisted and the notification, if any, delivered.
    Unfulfilled {
        product: Product,
        notification: Option<Notification>,
    },
    /// No rule applied. Nothing to persist, nothing to deliver.
    Untouched,
}

/// Entity: Product.
///
/// Stock is mutable only through [`Product::fulfill`]; there are no public
/// setters, so `units_available` can only move the way the rules allow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    units_available: u32,
    category: ProductCategory,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        units_available: u32,
        category: ProductCategory,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            units_available,
            category,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units_available(&self) -> u32 {
        self.units_available
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    /// Apply this product's fulfillment rule for one order line.
    ///
    /// | category   | reserves one unit when                   | otherwise                                 |
    /// |------------|------------------------------------------|-------------------------------------------|
    /// | normal     | units > 0                                | delay notice if lead time > 0, else no-op |
    /// | seasonal   | units > 0 and today inside window        | out-of-stock notice, stock untouched      |
    /// | expirable  | units > 0 and expiry after today         | expiry notice, stock forced to zero       |
    /// | flash-sale | units > 0 and today inside window        | stock forced to zero, silently            |
    /// | unknown    | never                                    | no-op                                     |
    ///
    /// Window and expiry comparisons are strict: the window's start and end
    /// dates do not sell, and a product expiring today is already expired.
    pub fn fulfill(&self, today: NaiveDate) -> FulfillmentOutcome {
        match self.category {
            ProductCategory::Normal { lead_time_days } => self.fulfill_normal(lead_time_days),
            ProductCategory::Seasonal {
                season_start_date,
                season_end_date,
            } => self.fulfill_seasonal(today, season_start_date, season_end_date),
            ProductCategory::Expirable { expiry_date } => self.fulfill_expirable(today, expiry_date),
            ProductCategory::FlashSale {
                season_start_date,
                season_end_date,
            } => self.fulfill_flash_sale(today, season_start_date, season_end_date),
            ProductCategory::Unknown => FulfillmentOutcome::Untouched,
        }
    }
}

impl Product {
    fn fulfill_normal(&self, lead_time_days: u32) -> FulfillmentOutcome {
        if self.units_available > 0 {
            return FulfillmentOutcome::Reserved {
                product: self.reserve_one(),
            };
        }

        if lead_time_days > 0 {
            // Persisted unchanged; the write marks the delay as handled.
            return FulfillmentOutcome::Unfulfilled {
                product: self.clone(),
                notification: Some(Notification::RestockDelay {
                    lead_time_days,
                    product_name: self.name.clone(),
                }),
            };
        }

        FulfillmentOutcome::Untouched
    }

    fn fulfill_seasonal(
        &self,
        today: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FulfillmentOutcome {
        if self.units_available > 0 && within_window(today, start, end) {
            return FulfillmentOutcome::Reserved {
                product: self.reserve_one(),
            };
        }

        FulfillmentOutcome::Unfulfilled {
            product: self.clone(),
            notification: Some(Notification::OutOfStock {
                product_name: self.name.clone(),
            }),
        }
    }

    fn fulfill_expirable(&self, today: NaiveDate, expiry_date: NaiveDate) -> FulfillmentOutcome {
        if self.units_available > 0 && expiry_date > today {
            return FulfillmentOutcome::Reserved {
                product: self.reserve_one(),
            };
        }

        FulfillmentOutcome::Unfulfilled {
            product: self.depleted(),
            notification: Some(Notification::Expired {
                product_name: self.name.clone(),
                expiry_date,
            }),
        }
    }

    fn fulfill_flash_sale(
        &self,
        today: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FulfillmentOutcome {
        if self.units_available > 0 && within_window(today, start, end) {
            return FulfillmentOutcome::Reserved {
                product: self.reserve_one(),
            };
        }

        // Flash sales are expected to sell out; ending one is not announced.
        FulfillmentOutcome::Unfulfilled {
            product: self.depleted(),
            notification: None,
        }
    }

    fn reserve_one(&self) -> Self {
        let mut updated = self.clone();
        updated.units_available -= 1;
        updated
    }

    fn depleted(&self) -> Self {
        let mut updated = self.clone();
        updated.units_available = 0;
        updated
    }
}

/// Both window edges are exclusive: the start and end dates themselves do
/// not sell.
fn within_window(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    today > start && today < end
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
