//! Tree loader - YAML/JSON file loading and parsing
//!
//! Decision trees are authored as YAML or JSON; data records are JSON or YAML
//! objects.

use super::types::{DataRecord, DecisionTree};
use crate::engine::error::{ArbiterError, Result};
use std::fs;
use std::path::Path;

/// Loads decision trees and data records from files
pub struct TreeLoader;

impl TreeLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a decision tree, picking the parser from the file extension
    pub fn load_tree<P: AsRef<Path>>(&self, path: P) -> Result<DecisionTree> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if is_json(path) {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Load a data record; the file must hold a single object
    pub fn load_data<P: AsRef<Path>>(&self, path: P) -> Result<DataRecord> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        match value {
            serde_json::Value::Object(record) => Ok(record),
            other => Err(ArbiterError::malformed(format!(
                "data record must be an object, got {}",
                other
            ))),
        }
    }

    /// Parse a decision tree from a YAML string
    pub fn parse_yaml(content: &str) -> Result<DecisionTree> {
        let tree: DecisionTree = serde_yaml::from_str(content)?;
        Ok(tree)
    }

    /// Parse a decision tree from a JSON string
    pub fn parse_json(content: &str) -> Result<DecisionTree> {
        let tree: DecisionTree = serde_json::from_str(content)?;
        Ok(tree)
    }
}

impl Default for TreeLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::action::ActionKind;
    use std::io::Write;

    const TREE_YAML: &str = r#"
name: Overdue Reminder
condition:
  comparisonKind: lessThan
  fieldType: date
  fieldName: dueDate
  compareTo: "2024-06-01"
trueActions:
  - kind: send-email
    parameters:
      emailAddress: billing@example.com
      subject: Overdue
      textBody: Your invoice is overdue.
repeatCount: 2
subActions:
  - kind: send-message
    parameters:
      phoneNumber: "+15550100"
      message: Reminder
"#;

    #[test]
    fn test_parse_yaml_tree() {
        let tree = TreeLoader::parse_yaml(TREE_YAML).unwrap();
        assert_eq!(tree.name, "Overdue Reminder");
        assert_eq!(tree.root.condition.field_name, "dueDate");
        assert_eq!(tree.root.true_actions[0].kind, ActionKind::SendEmail);
        assert_eq!(tree.root.repeat_count, Some(2));
        assert_eq!(tree.root.sub_actions[0].kind, ActionKind::SendMessage);
    }

    #[test]
    fn test_parse_json_tree() {
        let json = r#"{
            "name": "Age gate",
            "condition": {"comparisonKind": "greaterThan", "fieldType": "number", "fieldName": "age", "compareTo": 17},
            "trueActions": [{"kind": "send-message", "parameters": {"phoneNumber": "+1", "message": "hi"}}]
        }"#;
        let tree = TreeLoader::parse_json(json).unwrap();
        assert_eq!(tree.name, "Age gate");
        assert!(tree.root.false_actions.is_none());
    }

    #[test]
    fn test_invalid_yaml_returns_error() {
        let result = TreeLoader::parse_yaml("name: [unterminated");
        assert!(matches!(result, Err(ArbiterError::Yaml(_))));
    }

    #[test]
    fn test_missing_condition_returns_error() {
        let result = TreeLoader::parse_json(r#"{"name": "no condition", "trueActions": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_tree_and_data_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let tree_path = dir.path().join("tree.yaml");
        fs::File::create(&tree_path)
            .unwrap()
            .write_all(TREE_YAML.as_bytes())
            .unwrap();

        let data_path = dir.path().join("data.json");
        fs::write(&data_path, r#"{"dueDate": "2024-05-01"}"#).unwrap();

        let loader = TreeLoader::new();
        let tree = loader.load_tree(&tree_path).unwrap();
        assert_eq!(tree.name, "Overdue Reminder");

        let data = loader.load_data(&data_path).unwrap();
        assert_eq!(data["dueDate"], "2024-05-01");
    }

    #[test]
    fn test_load_data_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data.json");
        fs::write(&data_path, "[1, 2, 3]").unwrap();

        let err = TreeLoader::new().load_data(&data_path).unwrap_err();
        assert!(matches!(err, ArbiterError::MalformedInput(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TreeLoader::new().load_tree("/nonexistent/tree.yaml").unwrap_err();
        assert!(matches!(err, ArbiterError::Io(_)));
    }
}
