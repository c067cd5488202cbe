//! The NodeProvider contract: the resolver's only view of storage.
//!
//! The resolver never talks to a database directly. It asks a provider
//! two questions: "who is this node's parent?" and "which members are
//! directly granted on this node?". Anything that can answer those two
//! questions (an in-memory map, a SQLite store, a remote service) can
//! back permission resolution.

use std::collections::BTreeSet;

use crate::error::ProviderError;
use crate::types::{MemberId, NodeId};

/// Read-only adjacency contract over the folder tree.
///
/// # Design Notes
///
/// - **Unknown nodes are not errors**: a node the provider has never
///   heard of has no parent and no grants. Only a genuine storage
///   failure produces an error; "no such row" must never masquerade
///   as "access denied" nor vice versa.
/// - **Synchronous by contract**: resolution is a pure CPU-bound read
///   path proportional to tree depth. Providers backed by slow storage
///   should do their own caching, not push suspension points into the
///   resolver.
pub trait NodeProvider {
    /// The parent of `node`, or `None` if it is top-level or unknown.
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ProviderError>;

    /// The members directly granted on `node` (no ancestor traversal).
    ///
    /// Returns the empty set for an unknown node.
    fn direct_grants(&self, node: NodeId) -> Result<BTreeSet<MemberId>, ProviderError>;
}

impl<P: NodeProvider + ?Sized> NodeProvider for &P {
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ProviderError> {
        (**self).parent(node)
    }

    fn direct_grants(&self, node: NodeId) -> Result<BTreeSet<MemberId>, ProviderError> {
        (**self).direct_grants(node)
    }
}
