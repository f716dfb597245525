use std::sync::Arc;

use chrono::{NaiveDate, Utc};

/// Calendar date source for fulfillment rules.
///
/// Rules compare whole dates (windows, expiry), so the port hands out a
/// `NaiveDate` rather than an instant.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Wall clock: the current date in UTC.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Pinned clock for tests/dev.
#[derive(Debug)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
