//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] textform_extractor::ExtractorError),

    /// Schema operation error
    #[error("Schema error: {0}")]
    Schema(#[from] textform_schema::SchemaError),

    /// Schema import error
    #[error("Schema import error: {0}")]
    SchemaImport(#[from] textform_schema::SchemaImportError),

    /// Persistence error
    #[error("Store error: {0}")]
    Store(#[from] textform_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No extraction result to operate on
    #[error("No result yet. Run 'analyze' first.")]
    NoResult,
}
