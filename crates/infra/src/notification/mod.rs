//! Notification channels for popularity alerts

pub mod http_mail;
pub mod log_mail;

use std::sync::Arc;

use tinderbox_core::NotificationChannel;
use tinderbox_domain::{MailConfig, MailDriver, Result as DomainResult};

pub use http_mail::{HttpMailChannel, MailMessage};
pub use log_mail::LogMailChannel;

/// Build the channel selected by `config.driver`.
pub fn build_channel(config: &MailConfig) -> DomainResult<Arc<dyn NotificationChannel>> {
    match config.driver {
        MailDriver::Log => Ok(Arc::new(LogMailChannel::new(config.from.clone()))),
        MailDriver::Http => Ok(Arc::new(HttpMailChannel::from_config(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use tinderbox_domain::TinderboxError;

    use super::*;

    #[test]
    fn http_driver_requires_relay_url() {
        let config = MailConfig { driver: MailDriver::Http, ..MailConfig::default() };
        assert!(matches!(build_channel(&config), Err(TinderboxError::Config(_))));
    }

    #[test]
    fn log_driver_is_default() {
        assert!(build_channel(&MailConfig::default()).is_ok());
    }
}
