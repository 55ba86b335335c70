// SPDX-License-Identifier: MIT

use super::dispatch::Dispatcher;
use crate::engine::action::{ActionExecutor, ActionKind, ActionResult};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

// --- Static schema ---

static SEND_MESSAGE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::to_value(schemars::schema_for!(SendMessageArgs)).unwrap_or_default()
});

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageArgs {
    /// Recipient phone number, e.g. "+15550100"
    pub phone_number: String,
    /// Text body
    #[serde(alias = "smsMessage")]
    pub message: String,
}

/// Sends a text message through the configured channel
pub struct SendMessageAction {
    dispatcher: Arc<dyn Dispatcher>,
}

impl SendMessageAction {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ActionExecutor for SendMessageAction {
    fn kind(&self) -> ActionKind {
        ActionKind::SendMessage
    }

    fn description(&self) -> &str {
        "Sends a text message to a phone number. Output carries a delivery report."
    }

    fn schema(&self) -> &Value {
        &SEND_MESSAGE_SCHEMA
    }

    async fn execute(&self, parameters: &Map<String, Value>) -> ActionResult {
        let args: SendMessageArgs =
            match serde_json::from_value(Value::Object(parameters.clone())) {
                Ok(args) => args,
                Err(e) => {
                    return ActionResult::failure(format!(
                        "Invalid send-message parameters: {}",
                        e
                    ))
                }
            };

        if args.phone_number.trim().is_empty() {
            return ActionResult::failure("Invalid send-message parameters: phoneNumber is empty");
        }

        log::info!("Sending message to {}", args.phone_number);

        let payload = json!({
            "to": args.phone_number,
            "body": args.message,
        });

        let mut output = Map::new();
        match self.dispatcher.dispatch(payload).await {
            Ok(_) => {
                output.insert("deliveryReport".into(), json!(true));
                ActionResult::success(format!("Message sent to {}", args.phone_number), output)
            }
            Err(e) => {
                log::warn!(
                    "Message to {} failed on channel {}: {}",
                    args.phone_number,
                    self.dispatcher.channel(),
                    e
                );
                output.insert("deliveryReport".into(), json!(false));
                ActionResult {
                    success: false,
                    result_message: format!("Message to {} failed: {}", args.phone_number, e),
                    output,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::actions::dispatch::LogDispatcher;
    use crate::engine::error::{ArbiterError, Result};

    struct FailingDispatcher;

    #[async_trait]
    impl Dispatcher for FailingDispatcher {
        fn channel(&self) -> &str {
            "broken"
        }

        async fn dispatch(&self, _payload: Value) -> Result<Value> {
            Err(ArbiterError::config("gateway unavailable"))
        }
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_send_message_reports_delivery() {
        let action = SendMessageAction::new(Arc::new(LogDispatcher::new("sms")));
        let result = action
            .execute(&params(json!({"phoneNumber": "+15550100", "message": "hi"})))
            .await;

        assert!(result.success);
        assert!(!result.result_message.is_empty());
        assert_eq!(result.output, params(json!({"deliveryReport": true})));
    }

    #[tokio::test]
    async fn test_legacy_sms_message_field() {
        let action = SendMessageAction::new(Arc::new(LogDispatcher::new("sms")));
        let result = action
            .execute(&params(json!({"phoneNumber": "+1", "smsMessage": "hi"})))
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_invalid_parameters_fail_softly() {
        let action = SendMessageAction::new(Arc::new(LogDispatcher::new("sms")));

        let result = action.execute(&params(json!({"message": "hi"}))).await;
        assert!(!result.success);
        assert!(result.result_message.contains("phoneNumber"));

        let result = action
            .execute(&params(json!({"phoneNumber": " ", "message": "hi"})))
            .await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_dispatch_failure_reported_in_result() {
        let action = SendMessageAction::new(Arc::new(FailingDispatcher));
        let result = action
            .execute(&params(json!({"phoneNumber": "+1", "message": "hi"})))
            .await;
        assert!(!result.success);
        assert_eq!(result.output["deliveryReport"], false);
        assert!(result.result_message.contains("gateway unavailable"));
    }

    #[test]
    fn test_schema_lists_parameters() {
        let action = SendMessageAction::new(Arc::new(LogDispatcher::new("sms")));
        let schema = action.schema();
        assert!(schema["properties"]["phoneNumber"].is_object());
        assert!(schema["properties"]["message"].is_object());
    }
}
