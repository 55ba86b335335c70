// SPDX-License-Identifier: MIT

//! Decision tree evaluation
//!
//! A tree is one named decision node: a typed condition on a data field, an
//! ordered list of actions for each branch, and an optional bounded loop over
//! sub-actions.

pub mod condition;
pub mod executor;
pub mod loader;
pub mod registry;
pub mod types;
pub mod validator;

pub use executor::DecisionEngine;
pub use loader::TreeLoader;
pub use registry::ActionRegistry;
pub use types::{DataRecord, DecisionNode, DecisionTree};
pub use validator::TreeValidator;
