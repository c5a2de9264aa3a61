//! Textform LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `textform-schema`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use textform_llm::MockProvider;
//! use textform_schema::traits::CompletionProvider;
//!
//! let provider = MockProvider::new(r#"{"fields":{},"memo":""}"#);
//! let reply = provider.complete("system", "user prompt").unwrap();
//! assert_eq!(reply, r#"{"fields":{},"memo":""}"#);
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use textform_schema::traits::CompletionProvider;
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network failure or non-2xx HTTP status
    #[error("transport error: {0}")]
    Transport(String),

    /// Response envelope could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("provider error: {0}")]
    Other(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without any network activity and counts
/// how many times it was called.
///
/// # Examples
///
/// ```
/// use textform_llm::MockProvider;
/// use textform_schema::traits::CompletionProvider;
///
/// let mut provider = MockProvider::new("default");
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.complete("sys", "prompt1").unwrap(), "response1");
/// assert_eq!(provider.complete("sys", "other").unwrap(), "default");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failing_prompts: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failing_prompts: Arc::new(Mutex::new(HashSet::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response keyed on the user prompt
    pub fn add_response(&mut self, user_prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_prompt.into(), response.into());
    }

    /// Make completion fail with a transport error for a specific user prompt
    pub fn add_error(&mut self, user_prompt: impl Into<String>) {
        self.failing_prompts.lock().unwrap().insert(user_prompt.into());
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    /// An empty extraction envelope: no fields, empty memo
    fn default() -> Self {
        Self::new(r#"{"fields":{},"memo":""}"#)
    }
}

impl CompletionProvider for MockProvider {
    type Error = ProviderError;

    fn complete(&self, _system: &str, user: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.failing_prompts.lock().unwrap().contains(user) {
            return Err(ProviderError::Transport("simulated transport failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(user) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default_response() {
        let provider = MockProvider::new("canned");
        assert_eq!(provider.complete("s", "anything").unwrap(), "canned");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete("s", "hello").unwrap(), "world");
        assert_eq!(provider.complete("s", "foo").unwrap(), "bar");
        assert_eq!(
            provider.complete("s", "unknown").unwrap(),
            r#"{"fields":{},"memo":""}"#
        );
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("x");
        assert_eq!(provider.call_count(), 0);

        provider.complete("s", "a").unwrap();
        provider.complete("s", "b").unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.complete("s", "bad prompt");
        assert!(matches!(result, Err(ProviderError::Transport(_))));
        // A failing call still counts, and other prompts are unaffected
        assert_eq!(provider.call_count(), 1);
        assert!(provider.complete("s", "good prompt").is_ok());
    }

    #[test]
    fn test_mock_provider_clone_shares_count() {
        let provider1 = MockProvider::new("x");
        let provider2 = provider1.clone();

        provider1.complete("s", "p").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
