//! Extraction results and field values

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single extracted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text (also what manual edits become)
    Text(String),
    /// Numeric value, kept as a JSON number to preserve integer formatting
    Number(serde_json::Number),
    /// Boolean value
    Bool(bool),
    /// The model could not recover a value
    Null,
}

impl FieldValue {
    /// Convert a scalar JSON value. Arrays and objects are not field values.
    pub fn from_json(value: &serde_json::Value) -> Option<FieldValue> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Number(n) => Some(FieldValue::Number(n.clone())),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Whether this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The string borne by a `Text` value, if that is what this is
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Stringify for display and TSV output. `Null` renders as empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

/// The outcome of one extraction: field values plus the original input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted value per field name
    pub fields: HashMap<String, FieldValue>,

    /// The text the values were extracted from
    pub memo: String,
}

impl ExtractionResult {
    /// Create a result
    pub fn new(fields: HashMap<String, FieldValue>, memo: impl Into<String>) -> Self {
        Self {
            fields,
            memo: memo.into(),
        }
    }

    /// Look up a field's value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Return a new result with one field overwritten.
    ///
    /// Manual corrections go through here; the value is not re-validated
    /// against the field's declared type.
    pub fn with_field(&self, name: impl Into<String>, value: FieldValue) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), value);
        Self {
            fields,
            memo: self.memo.clone(),
        }
    }

    /// Serialize all field values, in schema order, as tab-separated text.
    ///
    /// Missing and null values become empty segments.
    pub fn to_tsv(&self, schema: &Schema) -> String {
        schema
            .fields()
            .iter()
            .map(|field| {
                self.fields
                    .get(&field.name)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldType};

    fn title_amount_schema() -> Schema {
        Schema::from_fields(vec![
            FieldDescriptor::new("title", FieldType::String),
            FieldDescriptor::new("amount", FieldType::Number),
        ])
    }

    fn result_with(title: &str, amount: i64) -> ExtractionResult {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), FieldValue::Text(title.to_string()));
        fields.insert("amount".to_string(), FieldValue::Number(amount.into()));
        ExtractionResult::new(fields, "memo text")
    }

    #[test]
    fn test_tsv_in_schema_order() {
        let result = result_with("A", 5);
        assert_eq!(result.to_tsv(&title_amount_schema()), "A\t5");
    }

    #[test]
    fn test_tsv_null_and_missing_become_empty_segments() {
        let schema = Schema::from_fields(vec![
            FieldDescriptor::new("a", FieldType::String),
            FieldDescriptor::new("b", FieldType::String),
            FieldDescriptor::new("c", FieldType::String),
        ]);
        let mut fields = HashMap::new();
        fields.insert("a".to_string(), FieldValue::Text("x".to_string()));
        fields.insert("b".to_string(), FieldValue::Null);
        // "c" absent entirely
        let result = ExtractionResult::new(fields, "");
        assert_eq!(result.to_tsv(&schema), "x\t\t");
    }

    #[test]
    fn test_tsv_follows_reordered_schema() {
        let mut schema = title_amount_schema();
        schema.move_field(0, 1).unwrap();
        let result = result_with("A", 5);
        assert_eq!(result.to_tsv(&schema), "5\tA");
    }

    #[test]
    fn test_with_field_returns_new_result() {
        let original = result_with("A", 5);
        let edited = original.with_field("title", FieldValue::Text("B".to_string()));

        assert_eq!(original.get("title"), Some(&FieldValue::Text("A".to_string())));
        assert_eq!(edited.get("title"), Some(&FieldValue::Text("B".to_string())));
        assert_eq!(edited.memo, original.memo);
    }

    #[test]
    fn test_field_value_from_json() {
        use serde_json::json;
        assert_eq!(
            FieldValue::from_json(&json!("text")),
            Some(FieldValue::Text("text".to_string()))
        );
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::Bool(true)));
        assert_eq!(FieldValue::from_json(&json!(null)), Some(FieldValue::Null));
        assert_eq!(FieldValue::from_json(&json!([1, 2])), None);
        assert_eq!(FieldValue::from_json(&json!({"k": 1})), None);
    }

    #[test]
    fn test_integer_numbers_display_without_decimal_point() {
        let value = FieldValue::Number(5.into());
        assert_eq!(value.to_string(), "5");

        let fractional = FieldValue::from_json(&serde_json::json!(5.5)).unwrap();
        assert_eq!(fractional.to_string(), "5.5");
    }

    #[test]
    fn test_result_json_shape() {
        let result = result_with("A", 5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fields"]["title"], "A");
        assert_eq!(json["fields"]["amount"], 5);
        assert_eq!(json["memo"], "memo text");
    }
}
