//! The hierarchical permission resolver.
//!
//! View access to a folder is the union of its own direct grants and
//! the grants of every ancestor. Grants are additive: a descendant
//! cannot revoke what an ancestor granted, and there is no deny
//! record. Resolution is an iterative ascent from the starting folder
//! to the top of the tree, accumulating each visited folder's direct
//! grant set.
//!
//! The resolver is stateless and performs no caching; each call reads
//! the provider afresh, so a grant removed between two calls is gone
//! on the second. Cost is O(depth x grants per folder), which is fine
//! for folder hierarchies. Callers that need a point-in-time view
//! across the whole chain must rely on the provider's own isolation.

use std::collections::{BTreeSet, HashSet};

use securefold_core::{MemberId, NodeId, NodeProvider};

use crate::error::{ResolveError, Result};

/// Default bound on ancestor chain length.
///
/// Far deeper than any sane folder hierarchy; only a corrupted tree
/// whose parent links never terminate can reach it.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Resolves effective view permissions over a folder tree.
///
/// Generic over any [`NodeProvider`]; borrow a store per call or hand
/// over an owned provider, whichever fits the call site.
///
/// All node arguments are `Option<NodeId>`: `None` models a folder
/// that has no identity yet (unsaved in the admin UI) and resolves to
/// no permissions rather than an error.
#[derive(Debug, Clone)]
pub struct PermissionResolver<P> {
    provider: P,
    max_depth: usize,
}

impl<P: NodeProvider> PermissionResolver<P> {
    /// Create a resolver with the default depth bound.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the ancestor depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// All members who may view `node`: its own grants plus every
    /// ancestor's grants, deduplicated.
    ///
    /// Returns the empty set for `None` (unsaved folder).
    pub fn effective_members(&self, node: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        self.collect_from(node)
    }

    /// Members who may view `node` purely by inheritance: the
    /// effective set of its parent, excluding the node's own grants.
    ///
    /// This is what would remain if the node's own grants were
    /// removed. Empty for a top-level or unsaved folder.
    pub fn inherited_members(&self, node: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        match node {
            Some(id) => {
                let parent = self.provider.parent(id)?;
                self.collect_from(parent)
            }
            None => Ok(BTreeSet::new()),
        }
    }

    /// Whether `member` may view `node`.
    ///
    /// An absent member identity is a hard deny: anonymous access is
    /// never permitted by this mechanism, and the check short-circuits
    /// before touching the provider.
    pub fn can_view(&self, node: Option<NodeId>, member: Option<MemberId>) -> Result<bool> {
        match member {
            Some(id) => Ok(self.effective_members(node)?.contains(&id)),
            None => Ok(false),
        }
    }

    /// The node's own grant set, with no ancestor traversal.
    ///
    /// The base case of the recursive definitions above; also what the
    /// admin UI edits directly.
    pub fn direct_grants(&self, node: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        match node {
            Some(id) => Ok(self.provider.direct_grants(id)?),
            None => Ok(BTreeSet::new()),
        }
    }

    /// Iterative ascent accumulating direct grants of every folder
    /// from `start` to the top of the tree.
    ///
    /// The visited set turns a corrupted, cyclic parent chain into
    /// [`ResolveError::CycleDetected`] instead of an infinite loop;
    /// the depth bound catches non-repeating chains that are simply
    /// too long to be a real hierarchy.
    fn collect_from(&self, start: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        let mut members = BTreeSet::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = start;

        while let Some(node) = current {
            if !visited.insert(node) {
                return Err(ResolveError::CycleDetected { node });
            }
            if visited.len() > self.max_depth {
                return Err(ResolveError::DepthExceeded {
                    max: self.max_depth,
                });
            }

            members.extend(self.provider.direct_grants(node)?);
            current = self.provider.parent(node)?;
        }

        Ok(members)
    }
}
