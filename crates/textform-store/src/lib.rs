//! Textform persistence layer
//!
//! File-backed stores mirroring the two persisted keys of the application:
//! the schema (`schema.json`) and the API credential (`credential`), both
//! under the app data directory. Writes are synchronous and immediate; every
//! schema mutation is followed by a save.
//!
//! `MemoryCredentialStore` provides a deterministic in-memory implementation
//! for tests.

#![warn(missing_docs)]

mod credential;
mod error;
mod schema_store;

use std::path::PathBuf;

pub use credential::{CredentialStore, MemoryCredentialStore};
pub use error::StoreError;
pub use schema_store::SchemaStore;

/// The app data directory, `~/.textform`
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::NoDataDir)?;
    Ok(home.join(".textform"))
}
