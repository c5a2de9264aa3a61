//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

/// Trait for chat-completion providers
///
/// Implemented by the infrastructure layer (textform-llm)
pub trait CompletionProvider {
    /// Error type for provider operations
    type Error;

    /// Send one system + user message pair and return the raw content of
    /// the model's reply.
    fn complete(&self, system: &str, user: &str) -> Result<String, Self::Error>;
}

/// Trait for reading the stored API credential
///
/// Implemented by the infrastructure layer (textform-store)
pub trait CredentialSource {
    /// Error type for credential access
    type Error;

    /// The stored credential, if any
    fn get(&self) -> Result<Option<String>, Self::Error>;

    /// Whether a credential is stored; derived from [`get`](Self::get)
    fn has_credential(&self) -> Result<bool, Self::Error> {
        Ok(self.get()?.is_some())
    }
}
