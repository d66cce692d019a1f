//! HTTP mail relay channel
//!
//! Posts each alert as JSON to a relay endpoint. Any transport error or
//! non-2xx status is a delivery failure; the notifier leaves the person
//! unmarked and the next sweep tries again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tinderbox_core::NotificationChannel;
use tinderbox_domain::{MailConfig, PopularPersonAlert, Result as DomainResult, TinderboxError};
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// Request body sent to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl MailMessage {
    fn for_alert(from: &str, to: &str, alert: &PopularPersonAlert) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: alert.subject(),
            text: alert.body(),
        }
    }
}

/// Mail channel backed by an HTTP relay
#[derive(Clone)]
pub struct HttpMailChannel {
    client: Client,
    endpoint: Url,
    from: String,
    api_token: Option<String>,
}

impl HttpMailChannel {
    /// Create a channel for `endpoint` with the given request timeout.
    pub fn new(
        endpoint: &str,
        from: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> DomainResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|err| {
            TinderboxError::Config(format!("invalid mail relay URL '{endpoint}': {err}"))
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TinderboxError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, endpoint, from: from.into(), api_token })
    }

    /// Create a channel from the mail configuration.
    pub fn from_config(config: &MailConfig) -> DomainResult<Self> {
        let relay_url = config.relay_url.as_deref().ok_or_else(|| {
            TinderboxError::Config("mail.relay_url is required for the http mail driver".into())
        })?;
        Self::new(
            relay_url,
            config.from.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl NotificationChannel for HttpMailChannel {
    async fn send(&self, recipient: &str, alert: &PopularPersonAlert) -> DomainResult<()> {
        let message = MailMessage::for_alert(&self.from, recipient, alert);

        let mut request = self.client.post(self.endpoint.clone()).json(&message);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(InfraError::from)?;
        let status = response.status();
        debug!(person_id = alert.person_id, %status, "mail relay responded");

        response.error_for_status().map_err(InfraError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn alert() -> PopularPersonAlert {
        PopularPersonAlert {
            person_id: 7,
            name: "Emma Watson".into(),
            like_count: 51,
            location: "New York, NY".into(),
        }
    }

    fn channel(server: &MockServer, token: Option<&str>) -> HttpMailChannel {
        HttpMailChannel::new(
            &format!("{}/send", server.uri()),
            "noreply@tinderbox.local",
            token.map(str::to_string),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn posts_rendered_message_with_bearer_token() {
        let server = MockServer::start().await;
        let expected = json!({
            "from": "noreply@tinderbox.local",
            "to": "admin@example.com",
            "subject": "Popular Person Alert - Emma Watson",
            "text": alert().body(),
        });
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(expected))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        channel(&server, Some("secret")).send("admin@example.com", &alert()).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_is_delivery_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = channel(&server, None).send("admin@example.com", &alert()).await.unwrap_err();
        assert!(matches!(err, TinderboxError::NotificationDelivery(_)));
    }

    #[tokio::test]
    async fn slow_relay_times_out_as_delivery_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let channel = HttpMailChannel::new(
            &server.uri(),
            "noreply@tinderbox.local",
            None,
            Duration::from_millis(200),
        )
        .unwrap();
        let err = channel.send("admin@example.com", &alert()).await.unwrap_err();
        assert!(matches!(err, TinderboxError::NotificationDelivery(_)));
    }

    #[test]
    fn invalid_relay_url_is_config_error() {
        let err = HttpMailChannel::new("not a url", "a@b.c", None, Duration::from_secs(1));
        assert!(matches!(err, Err(TinderboxError::Config(_))));
    }
}
