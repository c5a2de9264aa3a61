//! Prompt engineering for field extraction

use textform_schema::FieldDescriptor;

/// System message sent with every extraction request
pub const SYSTEM_PROMPT: &str = "You are an assistant that extracts the requested \
information from the given text and returns it as JSON in the specified format.";

/// Builds the user prompt for one extraction
pub struct PromptBuilder {
    text: String,
    fields: Vec<FieldDescriptor>,
    current_year: i32,
}

impl PromptBuilder {
    /// Create a new prompt builder; the current year defaults to the wall clock
    pub fn new(text: impl Into<String>, fields: &[FieldDescriptor]) -> Self {
        Self {
            text: text.into(),
            fields: fields.to_vec(),
            current_year: time::OffsetDateTime::now_utc().year(),
        }
    }

    /// Override the year used by the missing-year date rule
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and envelope specification
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The text to analyze
        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        // 3. One line per requested field
        prompt.push_str("Fields to extract:\n");
        for field in &self.fields {
            match &field.description {
                Some(description) => {
                    prompt.push_str(&format!(
                        "- {} ({}): {}\n",
                        field.name, field.field_type, description
                    ));
                }
                None => {
                    prompt.push_str(&format!("- {} ({})\n", field.name, field.field_type));
                }
            }
        }
        prompt.push('\n');

        // 4. Formatting rules
        prompt.push_str("Rules:\n");
        prompt.push_str(&format!(
            "- Date fields MUST be formatted as YYYY-MM-DD; when the text omits the year, use the current year ({})\n",
            self.current_year
        ));
        prompt.push_str("- Number fields MUST be numeric JSON values, not strings\n");
        prompt.push_str("- Boolean fields MUST be JSON booleans (true/false)\n");
        prompt.push_str("- When a value cannot be recovered from the text, use JSON null (never an empty string or zero)\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract the requested fields from the text below.
Return a single JSON object of this shape:

{
  "fields": {
    "field_name": <extracted value>
  },
  "memo": "<the original text>"
}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Remember: Return ONLY a valid JSON object, no markdown code blocks, no explanations.";

#[cfg(test)]
mod tests {
    use super::*;
    use textform_schema::{FieldDescriptor, FieldType};

    fn sample_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Title", FieldType::String).with_description("Subject line"),
            FieldDescriptor::new("Date_start", FieldType::Date),
            FieldDescriptor::new("amount", FieldType::Number),
        ]
    }

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("Meeting on April 2nd", &sample_fields()).build();
        assert!(prompt.contains("Meeting on April 2nd"));
        assert!(prompt.contains("---"));
    }

    #[test]
    fn test_prompt_lists_fields_with_types_and_descriptions() {
        let prompt = PromptBuilder::new("text", &sample_fields()).build();
        assert!(prompt.contains("- Title (string): Subject line"));
        assert!(prompt.contains("- Date_start (date)\n"));
        assert!(prompt.contains("- amount (number)\n"));
    }

    #[test]
    fn test_prompt_includes_formatting_rules() {
        let prompt = PromptBuilder::new("text", &sample_fields())
            .with_current_year(2026)
            .build();
        assert!(prompt.contains("YYYY-MM-DD"));
        assert!(prompt.contains("use the current year (2026)"));
        assert!(prompt.contains("numeric JSON values, not strings"));
        assert!(prompt.contains("JSON booleans"));
        assert!(prompt.contains("JSON null"));
    }

    #[test]
    fn test_prompt_demands_pure_json() {
        let prompt = PromptBuilder::new("text", &sample_fields()).build();
        assert!(prompt.contains("ONLY a valid JSON object"));
        assert!(prompt.contains("\"memo\""));
    }

    #[test]
    fn test_prompt_field_order_matches_schema_order() {
        let prompt = PromptBuilder::new("text", &sample_fields()).build();
        let title_pos = prompt.find("- Title").unwrap();
        let date_pos = prompt.find("- Date_start").unwrap();
        let amount_pos = prompt.find("- amount").unwrap();
        assert!(title_pos < date_pos && date_pos < amount_pos);
    }
}
