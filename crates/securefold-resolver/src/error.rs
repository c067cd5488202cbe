//! Error types for permission resolution.

use thiserror::Error;

use securefold_core::{NodeId, ProviderError};

/// Errors that can occur during ancestor traversal.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The same node was visited twice during ascent. Well-formed
    /// trees never trigger this; it indicates corrupted parent links.
    #[error("parent cycle detected at folder {node}")]
    CycleDetected {
        /// The first node encountered a second time.
        node: NodeId,
    },

    /// Traversal walked more ancestors than the configured bound
    /// without reaching a top-level folder.
    #[error("ancestor chain exceeded maximum depth of {max}")]
    DepthExceeded {
        /// The configured depth bound.
        max: usize,
    },

    /// The node provider failed to answer.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
