// SPDX-License-Identifier: MIT

//! Typed error handling for arbiter-rs
//!
//! Every failure an evaluation can raise is a distinct variant, so callers can
//! tell validation problems apart from evaluation problems without string
//! matching.

use thiserror::Error;

/// Top-level error type for arbiter-rs
#[derive(Debug, Error)]
pub enum ArbiterError {
    /// Condition names a field type outside string/number/date
    #[error("Unsupported field type '{0}'")]
    UnsupportedFieldType(String),

    /// Comparison kind is not recognized for the resolved field type
    #[error("Unsupported {field_type} comparison '{comparison}'")]
    UnsupportedComparison {
        field_type: String,
        comparison: String,
    },

    /// No executor is registered for the action kind
    #[error("Unknown action kind '{0}'")]
    UnknownActionKind(String),

    /// The data record has no value for the condition's field
    #[error("Field '{0}' is missing from the data record")]
    MissingField(String),

    /// Structurally invalid tree, condition or data
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration errors (invalid env vars)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Evaluation exceeded its deadline
    #[error("Evaluation timed out after {0} seconds")]
    Timeout(u64),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ArbiterError {
    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unsupported comparison error
    pub fn unsupported_comparison(
        field_type: impl Into<String>,
        comparison: impl Into<String>,
    ) -> Self {
        Self::UnsupportedComparison {
            field_type: field_type.into(),
            comparison: comparison.into(),
        }
    }

    /// Stable identifier of the error kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFieldType(_) => "UnsupportedFieldType",
            Self::UnsupportedComparison { .. } => "UnsupportedComparison",
            Self::UnknownActionKind(_) => "UnknownActionKind",
            Self::MissingField(_) => "MissingField",
            Self::MalformedInput(_) | Self::Json(_) | Self::Yaml(_) => "MalformedInput",
            Self::Config(_) => "Config",
            Self::Timeout(_) => "Timeout",
            Self::Io(_) => "Io",
            Self::Http(_) => "Http",
        }
    }

    /// Whether the error originates from input validation rather than evaluation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::Json(_) | Self::Yaml(_)
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ArbiterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = [
            ArbiterError::UnsupportedFieldType("boolean".into()),
            ArbiterError::unsupported_comparison("number", "between"),
            ArbiterError::UnknownActionKind("fax".into()),
            ArbiterError::MissingField("age".into()),
            ArbiterError::malformed("bad"),
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ArbiterError::UnknownActionKind("fax".into()).to_string(),
            "Unknown action kind 'fax'"
        );
        assert_eq!(
            ArbiterError::unsupported_comparison("date", "between").to_string(),
            "Unsupported date comparison 'between'"
        );
        assert_eq!(
            ArbiterError::MissingField("age".into()).to_string(),
            "Field 'age' is missing from the data record"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(ArbiterError::malformed("x").is_validation());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ArbiterError::from(json_err).is_validation());
        assert!(!ArbiterError::MissingField("x".into()).is_validation());
        assert!(!ArbiterError::UnknownActionKind("fax".into()).is_validation());
    }
}
