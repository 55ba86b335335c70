// SPDX-License-Identifier: MIT

use super::dispatch::Dispatcher;
use crate::engine::action::{ActionExecutor, ActionKind, ActionResult};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

static SEND_EMAIL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::to_value(schemars::schema_for!(SendEmailArgs)).unwrap_or_default()
});

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailArgs {
    pub email_address: String,
    pub subject: String,
    pub text_body: String,
}

/// Sends an email through the configured channel
pub struct SendEmailAction {
    dispatcher: Arc<dyn Dispatcher>,
}

impl SendEmailAction {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ActionExecutor for SendEmailAction {
    fn kind(&self) -> ActionKind {
        ActionKind::SendEmail
    }

    fn description(&self) -> &str {
        "Sends a plain-text email with a subject to one address."
    }

    fn schema(&self) -> &Value {
        &SEND_EMAIL_SCHEMA
    }

    async fn execute(&self, parameters: &Map<String, Value>) -> ActionResult {
        let args: SendEmailArgs = match serde_json::from_value(Value::Object(parameters.clone())) {
            Ok(args) => args,
            Err(e) => return ActionResult::failure(format!("Invalid send-email parameters: {}", e)),
        };

        if !args.email_address.contains('@') {
            return ActionResult::failure(format!(
                "Invalid send-email parameters: '{}' is not an email address",
                args.email_address
            ));
        }

        log::info!(
            "Sending email to {} with subject '{}'",
            args.email_address,
            args.subject
        );

        let payload = json!({
            "to": args.email_address,
            "subject": args.subject,
            "text": args.text_body,
        });

        match self.dispatcher.dispatch(payload).await {
            Ok(_) => ActionResult::success(
                format!("Email sent to {}", args.email_address),
                Map::new(),
            ),
            Err(e) => {
                log::warn!(
                    "Email to {} failed on channel {}: {}",
                    args.email_address,
                    self.dispatcher.channel(),
                    e
                );
                ActionResult::failure(format!("Email to {} failed: {}", args.email_address, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::actions::dispatch::LogDispatcher;

    fn action() -> SendEmailAction {
        SendEmailAction::new(Arc::new(LogDispatcher::new("email")))
    }

    #[tokio::test]
    async fn test_send_email() {
        let params = json!({
            "emailAddress": "ops@example.com",
            "subject": "Alert",
            "textBody": "Threshold crossed"
        });
        let result = action().execute(params.as_object().unwrap()).await;

        assert!(result.success);
        assert_eq!(result.result_message, "Email sent to ops@example.com");
        assert!(result.output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_subject_fails() {
        let params = json!({"emailAddress": "ops@example.com", "textBody": "x"});
        let result = action().execute(params.as_object().unwrap()).await;
        assert!(!result.success);
        assert!(result.result_message.contains("subject"));
    }

    #[tokio::test]
    async fn test_bad_address_fails() {
        let params = json!({"emailAddress": "nobody", "subject": "s", "textBody": "x"});
        let result = action().execute(params.as_object().unwrap()).await;
        assert!(!result.success);
    }
}
