// SPDX-License-Identifier: MIT

use crate::engine::action::{Action, ActionExecutor, ActionKind};
use crate::engine::error::{ArbiterError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Closed mapping of action kinds to their executors.
///
/// Executors are registered at startup; evaluation only reads the registry.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    executors: HashMap<ActionKind, Arc<dyn ActionExecutor>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, executor: Arc<dyn ActionExecutor>) {
        self.executors.insert(executor.kind(), executor);
    }

    pub fn get(&self, kind: &ActionKind) -> Option<Arc<dyn ActionExecutor>> {
        self.executors.get(kind).cloned()
    }

    pub fn contains(&self, kind: &ActionKind) -> bool {
        self.executors.contains_key(kind)
    }

    /// Registered kinds, sorted by name
    pub fn kinds(&self) -> Vec<ActionKind> {
        let mut kinds: Vec<ActionKind> = self.executors.keys().cloned().collect();
        kinds.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        kinds
    }

    /// Run one action and return a copy carrying its result
    pub async fn execute(&self, action: &Action) -> Result<Action> {
        let executor = self
            .get(&action.kind)
            .ok_or_else(|| ArbiterError::UnknownActionKind(action.kind.to_string()))?;

        let result = executor.execute(&action.parameters).await;
        Ok(action.executed(result))
    }

    /// Run actions strictly in order; a failed result does not stop the rest
    pub async fn execute_all(&self, actions: &[Action]) -> Result<Vec<Action>> {
        let mut executed = Vec::with_capacity(actions.len());
        for action in actions {
            executed.push(self.execute(action).await?);
        }
        Ok(executed)
    }
}
