// SPDX-License-Identifier: MIT

//! Condition model: a single typed comparison against one data field

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed comparison test against one named field of the data record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(alias = "comparisonType")]
    pub comparison_kind: ComparisonKind,
    /// How both sides are read (comparison rules differ per type)
    #[serde(alias = "targetPropertyType")]
    pub field_type: FieldType,
    /// Key into the data record
    #[serde(alias = "targetPropertyName")]
    pub field_name: String,
    /// The value the field is compared against; must match `field_type`
    pub compare_to: Value,
}

impl Condition {
    pub fn new(
        comparison_kind: ComparisonKind,
        field_type: FieldType,
        field_name: impl Into<String>,
        compare_to: Value,
    ) -> Self {
        Self {
            comparison_kind,
            field_type,
            field_name: field_name.into(),
            compare_to,
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComparisonKind {
    /// field == compareTo
    Equals,
    /// field > compareTo
    GreaterThan,
    /// field < compareTo
    LessThan,
    Unrecognized(String),
}

impl ComparisonKind {
    pub fn as_str(&self) -> &str {
        match self {
            ComparisonKind::Equals => "equals",
            ComparisonKind::GreaterThan => "greaterThan",
            ComparisonKind::LessThan => "lessThan",
            ComparisonKind::Unrecognized(name) => name,
        }
    }
}

impl From<String> for ComparisonKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" | "directComparison" => ComparisonKind::Equals,
            "greaterThan" => ComparisonKind::GreaterThan,
            "lessThan" => ComparisonKind::LessThan,
            _ => ComparisonKind::Unrecognized(s),
        }
    }
}

impl From<ComparisonKind> for String {
    fn from(kind: ComparisonKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data type of the compared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Date,
    Unrecognized(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Unrecognized(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            _ => FieldType::Unrecognized(s),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn string_enum_schema(gen: &mut SchemaGenerator, values: &[&str]) -> Schema {
    let mut schema = String::json_schema(gen).into_object();
    schema.enum_values = Some(values.iter().map(|v| Value::from(*v)).collect());
    Schema::Object(schema)
}

impl JsonSchema for ComparisonKind {
    fn schema_name() -> String {
        "ComparisonKind".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        string_enum_schema(gen, &["equals", "greaterThan", "lessThan"])
    }
}

impl JsonSchema for FieldType {
    fn schema_name() -> String {
        "FieldType".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        string_enum_schema(gen, &["string", "number", "date"])
    }
}
