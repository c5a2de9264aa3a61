//! Textform access policy
//!
//! Allow-list gate for authenticated sessions. After an identity provider
//! reports a signed-in email, the caller consults [`AccessPolicy::is_allowed`]
//! and revokes the session when it returns false. The policy is an explicit
//! pure predicate, not ambient state; an empty allow-list denies everyone.
//!
//! # Examples
//!
//! ```
//! use textform_access::AccessPolicy;
//!
//! let policy = AccessPolicy::new(vec!["alice@example.com".to_string()]);
//! assert!(policy.is_allowed("alice@example.com"));
//! assert!(policy.is_allowed("Alice@Example.com"));
//! assert!(!policy.is_allowed("mallory@example.com"));
//! ```

#![warn(missing_docs)]

use std::collections::HashSet;

/// Fixed set of email addresses permitted to retain a session
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allowed: HashSet<String>,
}

impl AccessPolicy {
    /// Build a policy from an allow-list; addresses are matched
    /// case-insensitively
    pub fn new(allowed: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed: allowed.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Whether `email` may keep an authenticated session
    pub fn is_allowed(&self, email: &str) -> bool {
        self.allowed.contains(&email.to_lowercase())
    }

    /// Number of allow-listed addresses
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Whether the allow-list is empty (denies everyone)
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
