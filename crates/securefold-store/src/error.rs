//! Error types for the store module.

use thiserror::Error;

use securefold_core::ProviderError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A referenced folder or member does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Re-parenting was refused because it would make the folder its
    /// own ancestor.
    #[error("moving folder {folder} under {new_parent} would create a cycle")]
    WouldCreateCycle {
        folder: securefold_core::NodeId,
        new_parent: securefold_core::NodeId,
    },

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ProviderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidData(msg) => ProviderError::InvalidData(msg),
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
