//! Condition evaluator

use super::types::{ComparisonKind, Condition, FieldType};
use crate::engine::error::{ArbiterError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

enum Op {
    Eq,
    Gt,
    Lt,
}

/// Evaluate a condition against an extracted field value
pub fn evaluate(condition: &Condition, field_value: &Value) -> Result<bool> {
    let field = condition.field_name.as_str();
    let compare_to = &condition.compare_to;

    match &condition.field_type {
        FieldType::Number => {
            let op = resolve_op("number", &condition.comparison_kind)?;
            let left = as_number(field_value, field)?;
            let right = as_number(compare_to, "compareTo")?;
            Ok(match op {
                Op::Eq => left == right,
                Op::Gt => left > right,
                Op::Lt => left < right,
            })
        }
        FieldType::String => {
            let op = resolve_op("string", &condition.comparison_kind)?;
            let left = as_string(field_value, field)?;
            let right = as_string(compare_to, "compareTo")?;
            // Ordering compares lengths, not lexicographic order
            Ok(match op {
                Op::Eq => left == right,
                Op::Gt => left.chars().count() > right.chars().count(),
                Op::Lt => left.chars().count() < right.chars().count(),
            })
        }
        FieldType::Date => {
            let op = resolve_op("date", &condition.comparison_kind)?;
            let left = as_date(field_value, field)?;
            let right = as_date(compare_to, "compareTo")?;
            Ok(match op {
                Op::Eq => left.date_naive() == right.date_naive(),
                Op::Gt => left > right,
                Op::Lt => left < right,
            })
        }
        FieldType::Unrecognized(name) => Err(ArbiterError::UnsupportedFieldType(name.clone())),
    }
}

fn resolve_op(field_type: &str, kind: &ComparisonKind) -> Result<Op> {
    match kind {
        ComparisonKind::Equals => Ok(Op::Eq),
        ComparisonKind::GreaterThan => Ok(Op::Gt),
        ComparisonKind::LessThan => Ok(Op::Lt),
        ComparisonKind::Unrecognized(name) => {
            Err(ArbiterError::unsupported_comparison(field_type, name.as_str()))
        }
    }
}

fn as_number(value: &Value, what: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ArbiterError::malformed(format!("'{}' is not a number: {}", what, value)))
}

fn as_string<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ArbiterError::malformed(format!("'{}' is not a string: {}", what, value)))
}

fn as_date(value: &Value, what: &str) -> Result<DateTime<Utc>> {
    value
        .as_str()
        .and_then(parse_date)
        .ok_or_else(|| ArbiterError::malformed(format!("'{}' is not a date: {}", what, value)))
}

/// Parse a date field value. Accepts RFC 3339, a naive date-time or a plain
/// date; values without an offset are read as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
