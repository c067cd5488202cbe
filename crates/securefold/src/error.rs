//! Error types for the securefold facade.

use thiserror::Error;

use securefold_resolver::ResolveError;
use securefold_store::StoreError;

/// Errors surfaced by the access control facade.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Storage operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Permission resolution failed.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, AccessError>;
