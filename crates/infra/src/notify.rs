use std::sync::{Arc, Mutex};

use tracing::info;

use stockroom_products::Notification;

/// Sink for fulfillment notifications.
///
/// Delivery is fire-and-forget: the engine hands over the notification and
/// moves on. Transports decide what delivery means (log line, email, queue).
pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification);
}

impl<S> Notifier for Arc<S>
where
    S: Notifier + ?Sized,
{
    fn send(&self, notification: &Notification) {
        (**self).send(notification)
    }
}

/// Notifier that emits structured log lines.
///
/// The default transport for the dev server.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn send(&self, notification: &Notification) {
        match notification {
            Notification::OutOfStock { product_name } => {
                info!(product = %product_name, "product out of stock");
            }
            Notification::Expired {
                product_name,
                expiry_date,
            } => {
                info!(product = %product_name, expiry = %expiry_date, "product expired");
            }
            Notification::RestockDelay {
                lead_time_days,
                product_name,
            } => {
                info!(product = %product_name, lead_time_days, "restock delay notified");
            }
        }
    }
}

/// In-memory notifier for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    inner: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.inner.lock().unwrap().clone()
    }
}

impl Notifier for InMemoryNotifier {
    fn send(&self, notification: &Notification) {
        self.inner.lock().unwrap().push(notification.clone());
    }
}
