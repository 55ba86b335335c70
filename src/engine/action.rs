// SPDX-License-Identifier: MIT

//! Actions: predefined units of side-effecting work with a standardized result.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

static ANY_OBJECT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {}
    })
});

/// Kinds of actions a decision node can run.
///
/// Unknown names are kept as `Unrecognized` so the registry can reject them
/// with a proper error instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Send a text message (SMS)
    SendMessage,
    /// Send an email
    SendEmail,
    /// Any name outside the known set
    Unrecognized(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::SendMessage => "send-message",
            ActionKind::SendEmail => "send-email",
            ActionKind::Unrecognized(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "send-message" | "SMSAction" => ActionKind::SendMessage,
            "send-email" | "EmailAction" => ActionKind::SendEmail,
            _ => ActionKind::Unrecognized(s),
        }
    }
}

impl From<&str> for ActionKind {
    fn from(s: &str) -> Self {
        ActionKind::from(s.to_string())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JsonSchema for ActionKind {
    fn schema_name() -> String {
        "ActionKind".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Results of executing an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub result_message: String,
    #[serde(default)]
    pub output: Map<String, Value>,
}

impl ActionResult {
    pub fn success(message: impl Into<String>, output: Map<String, Value>) -> Self {
        Self {
            success: true,
            result_message: message.into(),
            output,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result_message: message.into(),
            output: Map::new(),
        }
    }
}

/// An action as declared in a decision node.
///
/// `execution_result` stays `None` until the action has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(alias = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_result: Option<ActionResult>,
}

impl Action {
    pub fn new(kind: impl Into<ActionKind>, parameters: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            parameters,
            execution_result: None,
        }
    }

    pub fn is_executed(&self) -> bool {
        self.execution_result.is_some()
    }

    /// Copy of this action carrying `result`
    pub fn executed(&self, result: ActionResult) -> Self {
        Self {
            kind: self.kind.clone(),
            parameters: self.parameters.clone(),
            execution_result: Some(result),
        }
    }
}

/// Trait for executors bound to one action kind.
///
/// Executors never fail the evaluation: problems with parameters or with the
/// side effect itself come back as an unsuccessful `ActionResult`.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// The action kind this executor handles
    fn kind(&self) -> ActionKind;

    /// Returns a human-readable description of what the action does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the action's parameters
    fn schema(&self) -> &Value {
        &ANY_OBJECT_SCHEMA
    }

    /// Perform the side effect with the given parameters
    async fn execute(&self, parameters: &Map<String, Value>) -> ActionResult;
}
