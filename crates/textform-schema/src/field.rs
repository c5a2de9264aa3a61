//! Field descriptors and name validation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Data type a field can be extracted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    String,
    /// Numeric JSON value (never a quoted string)
    Number,
    /// ISO calendar date, `YYYY-MM-DD`
    Date,
    /// JSON boolean
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
        };
        write!(f, "{}", s)
    }
}

/// One entry of a schema: a named, typed slot to fill from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name; unique within a schema, identifier syntax
    pub name: String,

    /// Declared data type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Optional human-readable hint passed through to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor without a description
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Blank descriptor appended by the schema editor's "add" operation
    pub fn blank() -> Self {
        Self::new("", FieldType::String)
    }
}

/// Why a field name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Name is the empty string
    #[error("field name is empty")]
    Empty,

    /// Name is not of the form `[A-Za-z_][A-Za-z0-9_]*`
    #[error("field name '{0}' is not a valid identifier")]
    InvalidSyntax(String),

    /// Name already used by another field in the same schema
    #[error("field name '{0}' is already used by another field")]
    Duplicate(String),
}

/// Validate a candidate field name against identifier syntax and the names
/// of the other fields in the schema.
pub fn validate_field_name<'a, I>(name: &str, other_names: I) -> Result<(), NameError>
where
    I: IntoIterator<Item = &'a str>,
{
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return Err(NameError::InvalidSyntax(name.to_string())),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(NameError::InvalidSyntax(name.to_string()));
    }

    for other in other_names {
        if other == name {
            return Err(NameError::Duplicate(name.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_field_name("Title", [].into_iter()).is_ok());
        assert!(validate_field_name("_private", [].into_iter()).is_ok());
        assert!(validate_field_name("Date_start", [].into_iter()).is_ok());
        assert!(validate_field_name("x2", [].into_iter()).is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_field_name("", [].into_iter()), Err(NameError::Empty));
    }

    #[test]
    fn test_invalid_syntax() {
        for bad in ["2start", "with space", "kebab-case", "dotted.name", "日付"] {
            assert_eq!(
                validate_field_name(bad, [].into_iter()),
                Err(NameError::InvalidSyntax(bad.to_string())),
                "expected {} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_duplicate_name() {
        let others = ["Title", "amount"];
        assert_eq!(
            validate_field_name("Title", others.iter().copied()),
            Err(NameError::Duplicate("Title".to_string()))
        );
        assert!(validate_field_name("memo", others.iter().copied()).is_ok());
    }

    #[test]
    fn test_field_type_serde_names() {
        let json = serde_json::to_string(&FieldType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
        let parsed: FieldType = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(parsed, FieldType::Date);
    }

    #[test]
    fn test_descriptor_serde_shape() {
        let field = FieldDescriptor::new("Title", FieldType::String)
            .with_description("Subject line");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["name"], "Title");
        assert_eq!(json["type"], "string");
        assert_eq!(json["description"], "Subject line");

        // description is omitted entirely when not set
        let bare = FieldDescriptor::new("n", FieldType::Number);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("description").is_none());
    }
}
