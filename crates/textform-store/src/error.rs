//! Error types for the persistence layer

use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The home/data directory could not be determined
    #[error("could not determine the data directory")]
    NoDataDir,
}
