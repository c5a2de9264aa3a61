//! Schema persistence

use crate::error::StoreError;
use std::fs;
use std::path::PathBuf;
use textform_schema::Schema;
use tracing::warn;

/// Fixed file name the schema is stored under.
///
/// Earlier revisions of the application were ambiguous about the storage key;
/// `schema.json` inside the data directory is the single authoritative one.
const SCHEMA_FILE: &str = "schema.json";

/// File-backed schema store: one `schema.json`, written on every mutation
#[derive(Debug, Clone)]
pub struct SchemaStore {
    path: PathBuf,
}

impl SchemaStore {
    /// Store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SCHEMA_FILE),
        }
    }

    /// Store rooted at the default app data directory
    pub fn default_location() -> Result<Self, StoreError> {
        Ok(Self::new(crate::data_dir()?))
    }

    /// Load the stored schema.
    ///
    /// Falls back to the built-in default template when the file is absent
    /// or unparsable; only I/O failures other than not-found are errors.
    pub fn load(&self) -> Result<Schema, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Schema::default_template());
            }
            Err(e) => return Err(e.into()),
        };

        match Schema::from_json(&contents) {
            Ok(schema) => Ok(schema),
            Err(e) => {
                warn!("stored schema is unparsable, using default template: {}", e);
                Ok(Schema::default_template())
            }
        }
    }

    /// Write the schema as indented JSON
    pub fn save(&self, schema: &Schema) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, schema.to_json_pretty())?;
        Ok(())
    }
}
