// SPDX-License-Identifier: MIT

//! Built-in action executors
//!
//! Each executor delivers through a `Dispatcher`: an HTTP webhook when one is
//! configured for its channel, the log otherwise.

pub mod dispatch;
pub mod email;
pub mod message;

use crate::arbiter::config::Config;
use crate::arbiter::tree::registry::ActionRegistry;
use crate::engine::action::ActionExecutor;
use dispatch::{Dispatcher, LogDispatcher, WebhookDispatcher};
use std::sync::Arc;
use url::Url;

fn dispatcher(channel: &str, url: Option<&Url>) -> Arc<dyn Dispatcher> {
    match url {
        Some(url) => Arc::new(WebhookDispatcher::new(channel, url.clone())),
        None => Arc::new(LogDispatcher::new(channel)),
    }
}

/// Create the built-in executors for the given configuration
pub fn create_actions(config: &Config) -> Vec<Arc<dyn ActionExecutor>> {
    vec![
        Arc::new(message::SendMessageAction::new(dispatcher(
            "sms",
            config.sms_webhook_url.as_ref(),
        ))),
        Arc::new(email::SendEmailAction::new(dispatcher(
            "email",
            config.email_webhook_url.as_ref(),
        ))),
    ]
}

/// Registry holding every built-in executor
pub fn default_registry(config: &Config) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    for action in create_actions(config) {
        log::info!("Registered action: {}", action.kind());
        registry.register(action);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::action::ActionKind;

    #[test]
    fn test_default_registry_has_builtin_kinds() {
        let registry = default_registry(&Config::default());
        assert_eq!(
            registry.kinds(),
            vec![ActionKind::SendEmail, ActionKind::SendMessage]
        );
    }
}
