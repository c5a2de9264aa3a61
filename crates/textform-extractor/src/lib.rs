//! Textform Extractor
//!
//! Fills a schema's typed fields from free text using a chat-completion API.
//!
//! # Architecture
//!
//! ```text
//! Text + Schema → PromptBuilder → CompletionProvider → parse → validate → ExtractionResult
//! ```
//!
//! A single round trip either succeeds or the whole operation fails: the
//! credential is checked before any network activity, the request is issued
//! exactly once, the reply is stripped of markdown code fences, parsed as
//! JSON, and date-typed fields are validated against `YYYY-MM-DD`.
//!
//! # Example Usage
//!
//! ```no_run
//! use textform_extractor::Extractor;
//! use textform_llm::MockProvider;
//! use textform_schema::Schema;
//! use textform_store::MemoryCredentialStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"fields":{},"memo":""}"#);
//! let credentials = MemoryCredentialStore::with_credential("sk-test");
//! let extractor = Extractor::new(provider, credentials);
//!
//! let schema = Schema::default_template();
//! let result = extractor.analyze("Office move on April 2nd", &schema).await?;
//! println!("memo: {}", result.memo);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;
mod parser;
mod prompt;

pub use error::ExtractorError;
pub use extractor::Extractor;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
