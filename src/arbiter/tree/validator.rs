// SPDX-License-Identifier: MIT

//! Input validation for decision trees
//!
//! Trees are checked here before evaluation, so the evaluator can rely on
//! `compareTo` matching the declared field type and on a bounded
//! `repeatCount`.

use super::condition::{parse_date, ComparisonKind, Condition, FieldType};
use super::types::DecisionTree;
use crate::engine::action::{Action, ActionKind};
use crate::engine::error::{ArbiterError, Result};
use serde_json::Value;

/// Default upper bound for `repeatCount`
pub const DEFAULT_MAX_REPEAT_COUNT: u32 = 1000;

/// Validates decision trees at the input boundary
#[derive(Debug, Clone)]
pub struct TreeValidator {
    max_repeat_count: u32,
    known_kinds: Option<Vec<ActionKind>>,
}

impl TreeValidator {
    pub fn new(max_repeat_count: u32) -> Self {
        Self {
            max_repeat_count,
            known_kinds: None,
        }
    }

    /// Only accept actions whose kind is in `kinds`
    pub fn with_known_kinds(mut self, kinds: Vec<ActionKind>) -> Self {
        self.known_kinds = Some(kinds);
        self
    }

    pub fn validate(&self, tree: &DecisionTree) -> Result<()> {
        if tree.name.trim().is_empty() {
            return Err(ArbiterError::malformed("decision tree name must not be empty"));
        }

        validate_condition(&tree.root.condition)?;

        if let Some(count) = tree.root.repeat_count {
            if count > self.max_repeat_count {
                return Err(ArbiterError::malformed(format!(
                    "repeatCount {} exceeds the maximum of {}",
                    count, self.max_repeat_count
                )));
            }
        }

        for action in tree.root.actions() {
            self.validate_action(action)?;
        }

        Ok(())
    }

    fn validate_action(&self, action: &Action) -> Result<()> {
        if let ActionKind::Unrecognized(name) = &action.kind {
            return Err(ArbiterError::malformed(format!(
                "unknown action kind '{}'",
                name
            )));
        }
        if let Some(kinds) = &self.known_kinds {
            if !kinds.contains(&action.kind) {
                return Err(ArbiterError::malformed(format!(
                    "action kind '{}' is not available",
                    action.kind
                )));
            }
        }
        if action.is_executed() {
            return Err(ArbiterError::malformed(format!(
                "action '{}' already carries an execution result",
                action.kind
            )));
        }
        Ok(())
    }
}

impl Default for TreeValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPEAT_COUNT)
    }
}

/// Check that a condition is well-formed and `compareTo` matches its type
pub fn validate_condition(condition: &Condition) -> Result<()> {
    if condition.field_name.trim().is_empty() {
        return Err(ArbiterError::malformed("condition fieldName must not be empty"));
    }

    if let ComparisonKind::Unrecognized(name) = &condition.comparison_kind {
        return Err(ArbiterError::malformed(format!(
            "unknown comparisonKind '{}'",
            name
        )));
    }

    let matches = match &condition.field_type {
        FieldType::Number => condition.compare_to.is_number(),
        FieldType::String => condition.compare_to.is_string(),
        FieldType::Date => condition
            .compare_to
            .as_str()
            .and_then(parse_date)
            .is_some(),
        FieldType::Unrecognized(name) => {
            return Err(ArbiterError::malformed(format!(
                "unknown fieldType '{}'",
                name
            )))
        }
    };

    if !matches {
        return Err(ArbiterError::malformed(format!(
            "compareTo {} does not match fieldType '{}'",
            describe(&condition.compare_to),
            condition.field_type
        )));
    }

    Ok(())
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}
