//! Port interfaces for popularity alert delivery

use async_trait::async_trait;
use tinderbox_domain::{PopularPersonAlert, Result};

/// Trait for sending a popularity alert to an operator address
///
/// Delivery is best effort. A failure should be reported as
/// `NotificationDelivery` so the sweep leaves the person unmarked.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Send one alert to `recipient`
    async fn send(&self, recipient: &str, alert: &PopularPersonAlert) -> Result<()>;
}
