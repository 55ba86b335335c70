// SPDX-License-Identifier: MIT

//! Notification channels the built-in actions deliver through

use crate::engine::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// A channel that delivers a notification payload and returns a receipt
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Returns the channel name used in logs
    fn channel(&self) -> &str;

    /// Deliver the payload
    async fn dispatch(&self, payload: Value) -> Result<Value>;
}

/// Writes notifications to the log; used when no webhook is configured
pub struct LogDispatcher {
    channel: String,
}

impl LogDispatcher {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl Dispatcher for LogDispatcher {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn dispatch(&self, payload: Value) -> Result<Value> {
        log::info!("[{}] dispatch: {}", self.channel, payload);
        Ok(json!({ "delivered": true, "channel": self.channel }))
    }
}

/// POSTs notifications as JSON to a webhook
pub struct WebhookDispatcher {
    channel: String,
    client: Client,
    url: Url,
}

impl WebhookDispatcher {
    pub fn new(channel: impl Into<String>, url: Url) -> Self {
        Self {
            channel: channel.into(),
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Dispatcher for WebhookDispatcher {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn dispatch(&self, payload: Value) -> Result<Value> {
        log::info!("[{}] POST {}", self.channel, self.url);

        let resp = self
            .client
            .post(self.url.clone())
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_dispatcher_reports_delivery() {
        let dispatcher = LogDispatcher::new("sms");
        let receipt = dispatcher
            .dispatch(json!({"to": "+15550100", "body": "hi"}))
            .await
            .unwrap();
        assert_eq!(receipt["delivered"], true);
        assert_eq!(receipt["channel"], "sms");
        assert_eq!(dispatcher.channel(), "sms");
    }

    #[tokio::test]
    async fn test_webhook_dispatcher_connection_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let url = Url::parse("http://127.0.0.1:9/hook").unwrap();
        let dispatcher = WebhookDispatcher::new("email", url);
        let result = dispatcher.dispatch(json!({"to": "a@example.com"})).await;
        assert!(result.is_err());
    }
}
