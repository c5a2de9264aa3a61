//! Parse and validate the model's reply

use crate::error::ExtractorError;
use serde_json::Value;
use std::collections::HashMap;
use textform_schema::{ExtractionResult, FieldType, FieldValue, Schema};
use tracing::warn;

/// Parse a reply into an `ExtractionResult` for the given schema.
///
/// Strips markdown code fences, parses the JSON payload, coerces each schema
/// field's value, and validates date-typed fields. Response keys that are not
/// in the schema are dropped; schema fields absent from the response become
/// null.
pub fn parse_response(
    response: &str,
    input_text: &str,
    schema: &Schema,
) -> Result<ExtractionResult, ExtractorError> {
    let json_str = extract_json(response)?;

    let payload: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::ResponseFormat(format!("JSON parse error: {}", e)))?;

    let obj = payload
        .as_object()
        .ok_or_else(|| ExtractorError::ResponseFormat("expected a JSON object".to_string()))?;

    let raw_fields = obj
        .get("fields")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            ExtractorError::ResponseFormat("missing or invalid 'fields' object".to_string())
        })?;

    let mut fields = HashMap::new();
    for descriptor in schema.fields() {
        let value = match raw_fields.get(&descriptor.name) {
            Some(raw) => FieldValue::from_json(raw).ok_or_else(|| {
                ExtractorError::ResponseFormat(format!(
                    "field '{}' has a non-scalar value",
                    descriptor.name
                ))
            })?,
            None => {
                warn!("field '{}' missing from response", descriptor.name);
                FieldValue::Null
            }
        };

        if descriptor.field_type == FieldType::Date {
            validate_date_field(&descriptor.name, &value)?;
        }

        fields.insert(descriptor.name.clone(), value);
    }

    // The model echoes the input as the memo; fall back to the input itself
    let memo = obj
        .get("memo")
        .and_then(|v| v.as_str())
        .unwrap_or(input_text)
        .to_string();

    Ok(ExtractionResult::new(fields, memo))
}

/// Extract JSON from a reply, handling markdown code fences
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::ResponseFormat("empty code block".to_string()));
        }

        // Skip the opening fence (``` or ```json) and the closing fence
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A null date is "unrecoverable" and allowed; any other value must be a
/// string matching `YYYY-MM-DD`.
fn validate_date_field(name: &str, value: &FieldValue) -> Result<(), ExtractorError> {
    match value {
        FieldValue::Null => Ok(()),
        FieldValue::Text(s) if is_iso_date(s) => Ok(()),
        FieldValue::Text(s) => Err(ExtractorError::Validation {
            field: name.to_string(),
            value: s.clone(),
        }),
        other => Err(ExtractorError::ResponseFormat(format!(
            "date field '{}' has non-string value '{}'",
            name, other
        ))),
    }
}

/// Shape check for `^\d{4}-\d{2}-\d{2}$`
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use textform_schema::FieldDescriptor;

    fn schema() -> Schema {
        Schema::from_fields(vec![
            FieldDescriptor::new("Title", FieldType::String),
            FieldDescriptor::new("Date_start", FieldType::Date),
            FieldDescriptor::new("amount", FieldType::Number),
            FieldDescriptor::new("approved", FieldType::Boolean),
        ])
    }

    #[test]
    fn test_parse_valid_payload() {
        let response = r#"{
            "fields": {
                "Title": "Office move",
                "Date_start": "2026-04-02",
                "amount": 1200,
                "approved": true
            },
            "memo": "original text"
        }"#;

        let result = parse_response(response, "input", &schema()).unwrap();
        assert_eq!(result.get("Title"), Some(&FieldValue::Text("Office move".to_string())));
        assert_eq!(
            result.get("Date_start"),
            Some(&FieldValue::Text("2026-04-02".to_string()))
        );
        assert_eq!(result.get("amount"), Some(&FieldValue::Number(1200.into())));
        assert_eq!(result.get("approved"), Some(&FieldValue::Bool(true)));
        assert_eq!(result.memo, "original text");
    }

    #[test]
    fn test_parse_fenced_payload() {
        let response = "```json\n{\"fields\":{},\"memo\":\"\"}\n```";
        let result = parse_response(response, "input", &Schema::new()).unwrap();
        assert_eq!(result.memo, "");
    }

    #[test]
    fn test_parse_fenced_payload_without_language_tag() {
        let response = "```\n{\"fields\":{\"Title\":\"A\"},\"memo\":\"m\"}\n```";
        let schema = Schema::from_fields(vec![FieldDescriptor::new("Title", FieldType::String)]);
        let result = parse_response(response, "input", &schema).unwrap();
        assert_eq!(result.get("Title"), Some(&FieldValue::Text("A".to_string())));
    }

    #[test]
    fn test_parse_non_json_fails() {
        let result = parse_response("Sure! Here is the data you asked for.", "input", &schema());
        assert!(matches!(result, Err(ExtractorError::ResponseFormat(_))));
    }

    #[test]
    fn test_parse_missing_fields_object_fails() {
        let result = parse_response(r#"{"memo": "x"}"#, "input", &schema());
        assert!(matches!(result, Err(ExtractorError::ResponseFormat(_))));
    }

    #[test]
    fn test_parse_array_payload_fails() {
        let result = parse_response(r#"[{"Title": "x"}]"#, "input", &schema());
        assert!(matches!(result, Err(ExtractorError::ResponseFormat(_))));
    }

    #[test]
    fn test_missing_schema_field_becomes_null() {
        let response = r#"{"fields": {"Title": "x"}, "memo": "m"}"#;
        let result = parse_response(response, "input", &schema()).unwrap();
        assert_eq!(result.get("amount"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_extra_response_keys_are_dropped() {
        let response = r#"{"fields": {"Title": "x", "unrequested": 1}, "memo": "m"}"#;
        let result = parse_response(response, "input", &schema()).unwrap();
        assert_eq!(result.get("unrequested"), None);
    }

    #[test]
    fn test_missing_memo_falls_back_to_input() {
        let response = r#"{"fields": {}}"#;
        let result = parse_response(response, "the input text", &Schema::new()).unwrap();
        assert_eq!(result.memo, "the input text");
    }

    #[test]
    fn test_date_validation_accepts_iso_only() {
        for bad in ["04-15-2024", "2024/04/15", "2024-4-15", "20240415", "yesterday"] {
            let response = format!(r#"{{"fields": {{"Date_start": "{}"}}, "memo": ""}}"#, bad);
            let result = parse_response(&response, "input", &schema());
            assert!(
                matches!(result, Err(ExtractorError::Validation { .. })),
                "expected '{}' to fail date validation",
                bad
            );
        }
    }

    #[test]
    fn test_null_date_is_allowed() {
        let response = r#"{"fields": {"Date_start": null}, "memo": ""}"#;
        let result = parse_response(response, "input", &schema()).unwrap();
        assert_eq!(result.get("Date_start"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_numeric_date_is_a_format_error() {
        let response = r#"{"fields": {"Date_start": 20260402}, "memo": ""}"#;
        let result = parse_response(response, "input", &schema());
        assert!(matches!(result, Err(ExtractorError::ResponseFormat(_))));
    }

    #[test]
    fn test_non_scalar_field_value_fails() {
        let response = r#"{"fields": {"Title": ["a", "b"]}, "memo": ""}"#;
        let result = parse_response(response, "input", &schema());
        assert!(matches!(result, Err(ExtractorError::ResponseFormat(_))));
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2026-04-02"));
        assert!(is_iso_date("0001-01-01"));
        assert!(!is_iso_date("2026-04-2"));
        assert!(!is_iso_date("2026-04-020"));
        assert!(!is_iso_date("2026_04_02"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn test_extract_json_passthrough() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_strips_fences() {
        let response = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response).unwrap().trim(), r#"{"key": "value"}"#);
    }
}
