//! Error types for the securefold core.

use thiserror::Error;

/// Errors a node provider may surface during resolution reads.
///
/// Providers must not map "node not found" to an error; absence means
/// no parent and no grants. These variants are reserved for genuine
/// failures that callers have to see, so that a storage outage is
/// never mistaken for an authorization decision.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backing storage failed to answer.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The provider returned data it could not interpret.
    #[error("invalid node data: {0}")]
    InvalidData(String),
}
