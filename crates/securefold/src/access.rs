//! The AccessControl facade: store and resolver behind one API.
//!
//! Wires a [`FolderStore`] to the [`PermissionResolver`] so callers
//! get administration (folders, members, grants) and authorization
//! queries from a single handle. The acting member is always passed
//! explicitly; nothing here reads ambient session state.

use std::collections::BTreeSet;

use securefold_core::{Folder, Member, MemberGrant, MemberId, NodeId};
use securefold_resolver::{PermissionResolver, DEFAULT_MAX_DEPTH};
use securefold_store::{FolderStore, GrantOutcome};

use crate::error::Result;

/// Configuration for access control.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Bound on ancestor chain length during resolution.
    pub max_depth: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The main access control handle.
///
/// Provides a unified API for:
/// - Creating and arranging folders
/// - Managing member records
/// - Granting and revoking direct view access
/// - Resolving effective and inherited permissions
pub struct AccessControl<S: FolderStore> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: AccessConfig,
}

impl<S: FolderStore> AccessControl<S> {
    /// Create an access control handle with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, AccessConfig::default())
    }

    /// Create an access control handle with explicit configuration.
    pub fn with_config(store: S, config: AccessConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a resolver borrowing the store for the duration of a query.
    fn resolver(&self) -> PermissionResolver<&S> {
        PermissionResolver::new(&self.store).with_max_depth(self.config.max_depth)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Folder Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a folder under `parent` (`None` for top-level).
    pub fn create_folder(&self, name: &str, parent: Option<NodeId>) -> Result<NodeId> {
        Ok(self.store.create_folder(name, parent)?)
    }

    /// Fetch a folder by id.
    pub fn get_folder(&self, id: NodeId) -> Result<Option<Folder>> {
        Ok(self.store.get_folder(id)?)
    }

    /// Re-parent a folder. Refuses moves that would create a cycle.
    pub fn move_folder(&self, id: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        Ok(self.store.move_folder(id, new_parent)?)
    }

    /// List the immediate children of a folder.
    pub fn list_children(&self, parent: Option<NodeId>) -> Result<Vec<Folder>> {
        Ok(self.store.list_children(parent)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Member Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a member record.
    pub fn add_member(&self, name: &str, email: Option<&str>) -> Result<MemberId> {
        Ok(self.store.add_member(name, email)?)
    }

    /// Fetch a member by id.
    pub fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        Ok(self.store.get_member(id)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Administration
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant `member` direct view access on `folder`. Idempotent.
    pub fn grant_view(&self, folder: NodeId, member: MemberId) -> Result<GrantOutcome> {
        let outcome = self.store.add_grant(folder, member)?;
        tracing::debug!(%folder, %member, ?outcome, "grant view");
        Ok(outcome)
    }

    /// Remove a direct grant. Inherited access from ancestors is
    /// untouched; the model has no deny primitive.
    pub fn revoke_view(&self, folder: NodeId, member: MemberId) -> Result<bool> {
        let removed = self.store.remove_grant(folder, member)?;
        tracing::debug!(%folder, %member, removed, "revoke view");
        Ok(removed)
    }

    /// The direct grant records on a folder, for administrative display.
    pub fn grants(&self, folder: NodeId) -> Result<Vec<MemberGrant>> {
        Ok(self.store.grants(folder)?)
    }

    /// All folders a member is directly granted on.
    pub fn folders_granted_to(&self, member: MemberId) -> Result<Vec<NodeId>> {
        Ok(self.store.folders_granted_to(member)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// All members who may view `folder`, own grants and inherited.
    pub fn effective_members(&self, folder: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        Ok(self.resolver().effective_members(folder)?)
    }

    /// Members who may view `folder` purely by inheritance.
    pub fn inherited_members(&self, folder: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        Ok(self.resolver().inherited_members(folder)?)
    }

    /// Whether `member` may view `folder`. `None` member is a hard deny.
    pub fn can_view(&self, folder: Option<NodeId>, member: Option<MemberId>) -> Result<bool> {
        Ok(self.resolver().can_view(folder, member)?)
    }

    /// The folder's own grant set, no traversal.
    pub fn direct_grants(&self, folder: Option<NodeId>) -> Result<BTreeSet<MemberId>> {
        Ok(self.resolver().direct_grants(folder)?)
    }

    /// Full member records for everyone with effective access, for
    /// administrative display. Ids without a surviving member record
    /// are skipped.
    pub fn members_with_access(&self, folder: Option<NodeId>) -> Result<Vec<Member>> {
        let ids = self.effective_members(folder)?;
        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(member) = self.store.get_member(id)? {
                members.push(member);
            }
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use securefold_store::MemoryStore;

    #[test]
    fn test_facade_wires_store_and_resolver() {
        let ac = AccessControl::new(MemoryStore::new());

        let root = ac.create_folder("assets", None).unwrap();
        let child = ac.create_folder("reports", Some(root)).unwrap();
        let ada = ac.add_member("Ada", None).unwrap();

        ac.grant_view(root, ada).unwrap();

        assert!(ac.can_view(Some(child), Some(ada)).unwrap());
        assert!(ac.direct_grants(Some(child)).unwrap().is_empty());
        assert_eq!(ac.inherited_members(Some(child)).unwrap().len(), 1);
    }

    #[test]
    fn test_members_with_access_resolves_records() {
        let ac = AccessControl::new(MemoryStore::new());

        let folder = ac.create_folder("assets", None).unwrap();
        let ada = ac.add_member("Ada", Some("ada@example.org")).unwrap();
        ac.grant_view(folder, ada).unwrap();

        let members = ac.members_with_access(Some(folder)).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Ada");
    }

    #[test]
    fn test_grant_outcome_surfaces() {
        let ac = AccessControl::new(MemoryStore::new());

        let folder = ac.create_folder("assets", None).unwrap();
        let ada = ac.add_member("Ada", None).unwrap();

        assert_eq!(ac.grant_view(folder, ada).unwrap(), GrantOutcome::Granted);
        assert_eq!(
            ac.grant_view(folder, ada).unwrap(),
            GrantOutcome::AlreadyGranted
        );
    }
}
