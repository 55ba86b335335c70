// SPDX-License-Identifier: MIT

//! Decision tree type definitions
//!
//! A decision node is one point of execution: an if/else on a condition plus
//! an optional bounded loop. A decision tree is a named root node.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::condition::Condition;
use crate::engine::action::Action;

/// Runtime data a tree is evaluated against: field name to value
pub type DataRecord = Map<String, Value>;

/// One evaluable unit: condition, branch actions and an optional repeat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNode {
    pub condition: Condition,
    /// Run in order when the condition holds
    #[serde(default, alias = "action", deserialize_with = "one_or_many")]
    #[schemars(with = "Vec<Action>")]
    pub true_actions: Vec<Action>,
    /// Run in order when the condition does not hold
    #[serde(
        default,
        alias = "elseAction",
        deserialize_with = "optional_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Vec<Action>>")]
    pub false_actions: Option<Vec<Action>>,
    /// Set to `false` when the false branch ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_result: Option<bool>,
    /// Number of sub-action iterations
    #[serde(default, alias = "x", skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<u32>,
    /// Run on each iteration whose fresh condition check holds
    #[serde(default, alias = "subtree", skip_serializing_if = "Vec::is_empty")]
    pub sub_actions: Vec<Action>,
    /// One entry per iteration, present only when repetition occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtree_outputs: Option<Vec<Vec<Action>>>,
}

impl DecisionNode {
    pub fn new(condition: Condition, true_actions: Vec<Action>) -> Self {
        Self {
            condition,
            true_actions,
            false_actions: None,
            condition_result: None,
            repeat_count: None,
            sub_actions: Vec::new(),
            subtree_outputs: None,
        }
    }

    pub fn with_false_actions(mut self, actions: Vec<Action>) -> Self {
        self.false_actions = Some(actions);
        self
    }

    pub fn with_repeat(mut self, count: u32, sub_actions: Vec<Action>) -> Self {
        self.repeat_count = Some(count);
        self.sub_actions = sub_actions;
        self
    }

    /// Whether evaluation will loop over `sub_actions`
    pub fn repeats(&self) -> bool {
        self.repeat_count.unwrap_or(0) > 0 && !self.sub_actions.is_empty()
    }

    /// All declared actions, in branch order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.true_actions
            .iter()
            .chain(self.false_actions.iter().flatten())
            .chain(self.sub_actions.iter())
    }
}

/// A named decision node, the unit a caller submits for evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionTree {
    /// Identifier of the tree, e.g. "Christmas Bonus Detector"
    pub name: String,
    #[serde(flatten)]
    pub root: DecisionNode,
}

impl DecisionTree {
    pub fn new(name: impl Into<String>, root: DecisionNode) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

/// Action list as written in a tree document: one action or an array
#[derive(Deserialize)]
#[serde(untagged)]
enum ActionList {
    Single(Box<Action>),
    Multiple(Vec<Action>),
}

impl ActionList {
    fn into_vec(self) -> Vec<Action> {
        match self {
            ActionList::Single(action) => vec![*action],
            ActionList::Multiple(actions) => actions,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ActionList::deserialize(deserializer)?.into_vec())
}

fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<Action>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ActionList>::deserialize(deserializer)?.map(ActionList::into_vec))
}
