//! OpenAI Provider Implementation
//!
//! Integration with the OpenAI chat-completions API. A single request either
//! succeeds or the whole operation fails: no retries, no streaming.
//!
//! # Examples
//!
//! ```no_run
//! use textform_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4-turbo-preview");
//! ```

use crate::ProviderError;
use serde::{Deserialize, Serialize};
use textform_schema::traits::CompletionProvider as CompletionProviderTrait;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Sampling temperature; kept low for extraction fidelity
pub const TEMPERATURE: f64 = 0.3;

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response-format hint requesting strict JSON output
#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Response body from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Error body shape used by the API for non-2xx responses
#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiProvider {
    /// Create a provider for the default endpoint and a given model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Create a provider against a custom endpoint (OpenAI-compatible APIs)
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Send one system + user message pair and return the reply content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the request cannot be sent or the status is non-2xx (`Transport`)
    /// - the response envelope does not contain `choices[0].message.content`
    ///   (`InvalidResponse`)
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ProviderError::Transport(format!("HTTP {}: {}", status, detail)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no choices".to_string()))
    }
}

impl CompletionProviderTrait for OpenAiProvider {
    type Error = ProviderError;

    fn complete(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async method; callers off the async path
        // (and spawn_blocking) come through here
        tokio::runtime::Runtime::new()
            .map_err(|e| ProviderError::Other(format!("runtime error: {}", e)))?
            .block_on(async { self.complete(system, user).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("sk-test", "gpt-4-turbo-preview");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "gpt-4-turbo-preview");
    }

    #[test]
    fn test_provider_custom_endpoint() {
        let provider = OpenAiProvider::with_endpoint("http://localhost:8000", "key", "local-model");
        assert_eq!(provider.endpoint, "http://localhost:8000");
        assert_eq!(provider.model, "local-model");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4-turbo-preview",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4-turbo-preview");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["temperature"], 0.3);
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_envelope_parsing() {
        let body = r#"{"choices":[{"message":{"content":"{\"fields\":{}}","role":"assistant"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "{\"fields\":{}}");
    }

    #[test]
    fn test_api_error_body_parsing() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.unwrap().message, "Incorrect API key provided");
    }
}
