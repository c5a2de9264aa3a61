//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use textform_schema::{ExtractionResult, Schema};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the schema.
    pub fn format_schema(&self, schema: &Schema) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(schema.to_json_pretty()),
            OutputFormat::Table => Ok(self.format_schema_table(schema)),
            OutputFormat::Quiet => Ok(schema
                .fields()
                .iter()
                .map(|f| f.name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an extraction result.
    pub fn format_result(&self, result: &ExtractionResult, schema: &Schema) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result, schema)),
            OutputFormat::Quiet => Ok(result.to_tsv(schema)),
        }
    }

    /// Format the schema as a table.
    fn format_schema_table(&self, schema: &Schema) -> String {
        if schema.is_empty() {
            return self.colorize("Schema has no fields.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Name", "Type", "Description"]);

        for (index, field) in schema.fields().iter().enumerate() {
            builder.push_record([
                index.to_string(),
                field.name.clone(),
                field.field_type.to_string(),
                field.description.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format an extraction result as a table, memo appended.
    fn format_result_table(&self, result: &ExtractionResult, schema: &Schema) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        for field in schema.fields() {
            let value = result
                .get(&field.name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            builder.push_record([&field.name, &value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\nMemo: {}", table, result.memo)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use textform_schema::{FieldDescriptor, FieldType, FieldValue};

    fn test_schema() -> Schema {
        Schema::from_fields(vec![
            FieldDescriptor::new("title", FieldType::String).with_description("Subject"),
            FieldDescriptor::new("amount", FieldType::Number),
        ])
    }

    fn test_result() -> ExtractionResult {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), FieldValue::Text("A".to_string()));
        fields.insert("amount".to_string(), FieldValue::Number(5.into()));
        ExtractionResult::new(fields, "source text")
    }

    #[test]
    fn test_schema_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_schema(&test_schema()).unwrap();
        assert!(output.contains("title"));
        assert!(output.contains("number"));
        assert!(output.contains("Subject"));
    }

    #[test]
    fn test_schema_quiet_format_lists_names() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_schema(&test_schema()).unwrap();
        assert_eq!(output, "title\namount");
    }

    #[test]
    fn test_result_quiet_format_is_tsv() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_result(&test_result(), &test_schema()).unwrap();
        assert_eq!(output, "A\t5");
    }

    #[test]
    fn test_result_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_result(&test_result(), &test_schema()).unwrap();
        assert!(output.contains("\"memo\""));
        assert!(output.contains("\"title\""));
    }

    #[test]
    fn test_result_table_includes_memo() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_result(&test_result(), &test_schema()).unwrap();
        assert!(output.contains("Memo: source text"));
    }
}
