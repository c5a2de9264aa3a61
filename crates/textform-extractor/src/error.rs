//! Error types for the extraction client

use textform_llm::ProviderError;
use thiserror::Error;

/// Errors that can occur during an extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// No API credential is stored; checked before any network activity
    #[error("no API credential is stored")]
    CredentialMissing,

    /// The credential store itself failed
    #[error("credential store error: {0}")]
    CredentialStore(String),

    /// The HTTP call did not succeed
    #[error("transport error: {0}")]
    Transport(String),

    /// The payload could not be parsed after stripping code fences, or had
    /// the wrong shape
    #[error("response format error: {0}")]
    ResponseFormat(String),

    /// A field declared as `date` did not match `YYYY-MM-DD`
    #[error("field '{field}' is not a valid date: '{value}' (expected YYYY-MM-DD)")]
    Validation {
        /// Name of the offending field
        field: String,
        /// The value the model returned
        value: String,
    },
}

impl From<ProviderError> for ExtractorError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Transport(msg) | ProviderError::Other(msg) => {
                ExtractorError::Transport(msg)
            }
            ProviderError::InvalidResponse(msg) => ExtractorError::ResponseFormat(msg),
        }
    }
}
