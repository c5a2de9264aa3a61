//! Core Extractor implementation

use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use std::sync::Arc;
use textform_schema::traits::{CompletionProvider, CredentialSource};
use textform_schema::{ExtractionResult, Schema};
use tracing::{debug, info};

/// The Extractor fills a schema's fields from free text via the completion API
pub struct Extractor<P, C>
where
    P: CompletionProvider,
    C: CredentialSource,
{
    provider: Arc<P>,
    credentials: C,
}

impl<P, C> Extractor<P, C>
where
    P: CompletionProvider + Send + Sync + 'static,
    C: CredentialSource,
    ExtractorError: From<P::Error>,
    C::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(provider: P, credentials: C) -> Self {
        Self {
            provider: Arc::new(provider),
            credentials,
        }
    }

    /// Extract the schema's fields from `text`.
    ///
    /// Fails fast with [`ExtractorError::CredentialMissing`] before any
    /// network activity when no credential is stored. One request attempt,
    /// no retry, no timeout enforcement.
    pub async fn analyze(
        &self,
        text: &str,
        schema: &Schema,
    ) -> Result<ExtractionResult, ExtractorError> {
        let has_credential = self
            .credentials
            .has_credential()
            .map_err(|e| ExtractorError::CredentialStore(e.to_string()))?;
        if !has_credential {
            return Err(ExtractorError::CredentialMissing);
        }

        info!(
            "Starting extraction: {} fields, text length {}",
            schema.len(),
            text.len()
        );

        let prompt = PromptBuilder::new(text, schema.fields()).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self.call_provider(&prompt).await?;
        debug!("Response length: {} chars", response.len());

        let result = parse_response(&response, text, schema)?;

        info!("Extraction complete: {} fields populated", result.fields.len());

        Ok(result)
    }

    /// Call the completion provider
    async fn call_provider(&self, prompt: &str) -> Result<String, ExtractorError> {
        let provider = Arc::clone(&self.provider);
        let prompt = prompt.to_string();

        // Call in a blocking context since CompletionProvider is not async
        tokio::task::spawn_blocking(move || {
            provider
                .complete(SYSTEM_PROMPT, &prompt)
                .map_err(ExtractorError::from)
        })
        .await
        .map_err(|e| ExtractorError::Transport(format!("task join error: {}", e)))?
    }
}
