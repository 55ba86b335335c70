// SPDX-License-Identifier: MIT

//! Condition evaluation for decision nodes
//!
//! A condition compares one data field against a constant:
//! - `number`: numeric equality and ordering
//! - `string`: exact equality, ordering by length
//! - `date`: same-day equality, chronological ordering

mod evaluator;
mod types;

pub use evaluator::{evaluate, parse_date};
pub use types::{ComparisonKind, Condition, FieldType};
