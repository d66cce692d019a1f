//! Log-only mail channel
//!
//! Renders the alert as a mail and writes it to the log instead of sending
//! it. Delivery never fails.

use async_trait::async_trait;
use tinderbox_core::NotificationChannel;
use tinderbox_domain::{PopularPersonAlert, Result as DomainResult};
use tracing::info;

/// Writes popularity alerts to the log
#[derive(Debug, Clone)]
pub struct LogMailChannel {
    from: String,
}

impl LogMailChannel {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl NotificationChannel for LogMailChannel {
    async fn send(&self, recipient: &str, alert: &PopularPersonAlert) -> DomainResult<()> {
        info!(
            from = %self.from,
            to = %recipient,
            subject = %alert.subject(),
            person_id = alert.person_id,
            body = %alert.body(),
            "mail"
        );
        Ok(())
    }
}
