//! API credential persistence

use crate::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use textform_schema::traits::CredentialSource;

/// Fixed file name the credential is stored under
const CREDENTIAL_FILE: &str = "credential";

/// File-backed credential store: one opaque token, plain storage, no expiry
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CREDENTIAL_FILE),
        }
    }

    /// Store rooted at the default app data directory
    pub fn default_location() -> Result<Self, StoreError> {
        Ok(Self::new(crate::data_dir()?))
    }

    /// The stored credential, if any
    pub fn get(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a credential, replacing any existing one
    pub fn set(&self, credential: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, credential)?;
        Ok(())
    }

    /// Remove the stored credential; removing an absent credential is fine
    pub fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CredentialSource for CredentialStore {
    type Error = StoreError;

    fn get(&self) -> Result<Option<String>, Self::Error> {
        CredentialStore::get(self)
    }
}

/// In-memory credential store for deterministic tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    credential: Option<String>,
}

impl MemoryCredentialStore {
    /// A store holding no credential
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding the given credential
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
        }
    }
}

impl CredentialSource for MemoryCredentialStore {
    type Error = StoreError;

    fn get(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.credential.clone())
    }
}
