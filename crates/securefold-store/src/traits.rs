//! FolderStore trait: the abstract interface for folder/grant persistence.
//!
//! This trait keeps the rest of the system storage-agnostic.
//! Implementations include SQLite (primary) and in-memory (for tests
//! and embedding). Every store is also a [`NodeProvider`], which is
//! the read-only slice the resolver consumes.

use securefold_core::{Folder, Member, MemberGrant, MemberId, NodeId, NodeProvider};

use crate::error::Result;

/// Result of adding a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The grant was recorded.
    Granted,
    /// The member already had a direct grant on this folder
    /// (idempotent - not an error).
    AlreadyGranted,
}

/// The FolderStore trait: persistence for folders, members, and grants.
///
/// # Design Notes
///
/// - **Idempotent grants**: granting the same (folder, member) pair
///   twice returns `AlreadyGranted`; grants are a set.
/// - **Referential checks**: grants and parent links may only point at
///   existing rows; violations surface as `NotFound`.
/// - **Acyclic by construction**: `move_folder` refuses to place a
///   folder under one of its own descendants, so well-behaved callers
///   never hand the resolver a cyclic tree.
pub trait FolderStore: NodeProvider {
    // ─────────────────────────────────────────────────────────────────────────
    // Folder Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a folder under `parent` (`None` for top-level).
    ///
    /// Returns the new folder's id. Fails with `NotFound` if the
    /// parent does not exist.
    fn create_folder(&self, name: &str, parent: Option<NodeId>) -> Result<NodeId>;

    /// Fetch a folder by id.
    fn get_folder(&self, id: NodeId) -> Result<Option<Folder>>;

    /// Re-parent a folder (`None` moves it to top level).
    ///
    /// Fails with `WouldCreateCycle` if `new_parent` is the folder
    /// itself or one of its descendants.
    fn move_folder(&self, id: NodeId, new_parent: Option<NodeId>) -> Result<()>;

    /// List the immediate children of a folder (`None` for the
    /// top-level folders), ordered by id.
    fn list_children(&self, parent: Option<NodeId>) -> Result<Vec<Folder>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Member Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a member record. Returns the new member's id.
    fn add_member(&self, name: &str, email: Option<&str>) -> Result<MemberId>;

    /// Fetch a member by id.
    fn get_member(&self, id: MemberId) -> Result<Option<Member>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant `member` direct view access on `folder`.
    fn add_grant(&self, folder: NodeId, member: MemberId) -> Result<GrantOutcome>;

    /// Remove a direct grant. Returns `true` if a grant was removed,
    /// `false` if none existed.
    fn remove_grant(&self, folder: NodeId, member: MemberId) -> Result<bool>;

    /// The direct grant records on a folder, ordered by member id.
    ///
    /// Administrative view; permission checks go through the resolver,
    /// which uses the [`NodeProvider`] side of the store.
    fn grants(&self, folder: NodeId) -> Result<Vec<MemberGrant>>;

    /// All folders a member is directly granted on, ordered by folder
    /// id. Audit view; inherited access is not included.
    fn folders_granted_to(&self, member: MemberId) -> Result<Vec<NodeId>>;
}
