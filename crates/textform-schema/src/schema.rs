//! Ordered field schema and its editing operations

use crate::field::{validate_field_name, FieldDescriptor, FieldType, NameError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from positional schema operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Index does not point at an existing field
    #[error("field index {index} out of range (schema has {len} fields)")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of fields in the schema
        len: usize,
    },

    /// A rename was rejected
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Errors from importing a schema file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaImportError {
    /// File contents are not JSON at all
    #[error("import file is not valid JSON: {0}")]
    Json(String),

    /// Top-level value is not an array
    #[error("import file must contain a JSON array of field descriptors")]
    NotAnArray,

    /// An element does not match the descriptor shape
    #[error("invalid field descriptor: {0}")]
    BadDescriptor(String),
}

/// An ordered list of field descriptors defining what to extract from text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from descriptors
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// The built-in template used when no saved schema exists
    pub fn default_template() -> Self {
        Self::from_fields(vec![
            FieldDescriptor::new("Title", FieldType::String)
                .with_description("Title or subject line"),
            FieldDescriptor::new("Date_start", FieldType::Date)
                .with_description("Start date (YYYY-MM-DD)"),
            FieldDescriptor::new("Date_end", FieldType::Date)
                .with_description("End date (YYYY-MM-DD)"),
            FieldDescriptor::new("requester", FieldType::String)
                .with_description("Name of the requester"),
        ])
    }

    /// Fields in order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a blank string-typed descriptor
    pub fn add_field(&mut self) {
        self.fields.push(FieldDescriptor::blank());
    }

    /// Remove the field at `index`
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDescriptor, SchemaError> {
        self.check_index(index)?;
        Ok(self.fields.remove(index))
    }

    /// Move the field at `from` so it ends up at position `to`.
    ///
    /// Pure positional reorder: the set of descriptors is preserved, only
    /// their order changes. `[X, Y, Z]` with `move_field(0, 2)` becomes
    /// `[Y, Z, X]`.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), SchemaError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }

    /// Rename the field at `index`, validating identifier syntax and
    /// uniqueness against every other field.
    pub fn rename_field(&mut self, index: usize, name: &str) -> Result<(), SchemaError> {
        self.check_index(index)?;
        let others = self
            .fields
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.name.as_str());
        validate_field_name(name, others)?;
        self.fields[index].name = name.to_string();
        Ok(())
    }

    /// Change the declared type of the field at `index`
    pub fn set_field_type(&mut self, index: usize, field_type: FieldType) -> Result<(), SchemaError> {
        self.check_index(index)?;
        self.fields[index].field_type = field_type;
        Ok(())
    }

    /// Set or clear the description of the field at `index`
    pub fn set_field_description(
        &mut self,
        index: usize,
        description: Option<String>,
    ) -> Result<(), SchemaError> {
        self.check_index(index)?;
        self.fields[index].description = description.filter(|d| !d.is_empty());
        Ok(())
    }

    /// Validate every field name, returning the per-field violations.
    ///
    /// An invalid schema can still be displayed and edited; callers that
    /// start an extraction should treat an empty result as a precondition.
    pub fn validate(&self) -> Vec<(usize, NameError)> {
        let mut violations = Vec::new();
        for (index, field) in self.fields.iter().enumerate() {
            let others = self
                .fields
                .iter()
                .enumerate()
                .filter(|(i, _)| *i < index)
                .map(|(_, f)| f.name.as_str());
            if let Err(e) = validate_field_name(&field.name, others) {
                violations.push((index, e));
            }
        }
        violations
    }

    /// Whether every field name is valid and unique
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Replace the entire schema from a user-supplied JSON document.
    ///
    /// Rejected unless the document is an array of descriptor-shaped objects
    /// with a string name and a known type.
    pub fn from_json(json: &str) -> Result<Self, SchemaImportError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SchemaImportError::Json(e.to_string()))?;

        if !value.is_array() {
            return Err(SchemaImportError::NotAnArray);
        }

        let fields: Vec<FieldDescriptor> = serde_json::from_value(value)
            .map_err(|e| SchemaImportError::BadDescriptor(e.to_string()))?;

        Ok(Self::from_fields(fields))
    }

    /// Serialize as indented JSON for export
    pub fn to_json_pretty(&self) -> String {
        // Vec<FieldDescriptor> serialization cannot fail
        serde_json::to_string_pretty(&self.fields).unwrap_or_else(|_| "[]".to_string())
    }

    fn check_index(&self, index: usize) -> Result<(), SchemaError> {
        if index >= self.fields.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        Ok(())
    }
}
