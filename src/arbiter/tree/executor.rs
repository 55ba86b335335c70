//! Decision node executor

use crate::arbiter::tree::condition;
use crate::arbiter::tree::registry::ActionRegistry;
use crate::arbiter::tree::types::{DataRecord, DecisionNode, DecisionTree};
use crate::engine::action::Action;
use crate::engine::error::{ArbiterError, Result};
use serde_json::Value;
use std::sync::Arc;

/// Evaluates decision nodes against data records, running actions through a
/// shared registry.
#[derive(Clone)]
pub struct DecisionEngine {
    registry: Arc<ActionRegistry>,
}

impl DecisionEngine {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Evaluate the root node of a named tree
    pub async fn evaluate_tree(
        &self,
        tree: &DecisionTree,
        data: &DataRecord,
    ) -> Result<DecisionTree> {
        let root = self.evaluate(&tree.root, data).await?;
        Ok(DecisionTree::new(tree.name.clone(), root))
    }

    /// Evaluate one node and return an annotated copy.
    ///
    /// Any error aborts the whole node; no partial result is returned.
    pub async fn evaluate(&self, node: &DecisionNode, data: &DataRecord) -> Result<DecisionNode> {
        let mut output = node.clone();

        if self.condition_met(node, data)? {
            log::debug!(
                "Condition on '{}' held, running {} true actions",
                node.condition.field_name,
                node.true_actions.len()
            );
            output.true_actions = self.registry.execute_all(&node.true_actions).await?;
        } else if let Some(false_actions) = node.false_actions.as_ref().filter(|a| !a.is_empty()) {
            log::debug!(
                "Condition on '{}' failed, running {} false actions",
                node.condition.field_name,
                false_actions.len()
            );
            output.false_actions = Some(self.registry.execute_all(false_actions).await?);
            output.condition_result = Some(false);
        } else {
            log::debug!(
                "Condition on '{}' failed with no false actions",
                node.condition.field_name
            );
        }

        if node.repeats() {
            output.subtree_outputs = Some(self.run_iterations(node, data).await?);
        }

        Ok(output)
    }

    /// Run `sub_actions` `repeat_count` times, re-checking the condition
    /// before each iteration
    async fn run_iterations(
        &self,
        node: &DecisionNode,
        data: &DataRecord,
    ) -> Result<Vec<Vec<Action>>> {
        let count = node.repeat_count.unwrap_or(0);
        let mut iterations = Vec::new();

        for i in 0..count {
            // Yield so a caller's timeout can cancel long loops
            tokio::task::yield_now().await;

            let iteration = if self.condition_met(node, data)? {
                log::debug!("Iteration {}/{}: running sub actions", i + 1, count);
                self.registry.execute_all(&node.sub_actions).await?
            } else {
                log::debug!("Iteration {}/{}: condition failed, skipping", i + 1, count);
                node.sub_actions.clone()
            };
            iterations.push(iteration);
        }

        Ok(iterations)
    }

    /// Check if a node's condition is met for the given data
    fn condition_met(&self, node: &DecisionNode, data: &DataRecord) -> Result<bool> {
        let field_value = extract_field(data, &node.condition.field_name)?;
        condition::evaluate(&node.condition, field_value)
    }
}

/// Look up a field in the data record; absent and null values are missing
pub fn extract_field<'a>(data: &'a DataRecord, field_name: &str) -> Result<&'a Value> {
    match data.get(field_name) {
        Some(Value::Null) | None => Err(ArbiterError::MissingField(field_name.to_string())),
        Some(value) => Ok(value),
    }
}
