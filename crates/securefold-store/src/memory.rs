//! In-memory implementation of the FolderStore trait.
//!
//! This is primarily for testing and embedding. It has the same
//! semantics as SQLite but keeps everything in memory with no
//! persistence.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use securefold_core::{
    Folder, Member, MemberGrant, MemberId, NodeId, NodeProvider, ProviderError,
};

use crate::error::{Result, StoreError};
use crate::traits::{FolderStore, GrantOutcome};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Folders indexed by id.
    folders: BTreeMap<NodeId, Folder>,

    /// Members indexed by id.
    members: BTreeMap<MemberId, Member>,

    /// Direct grants: folder -> (member -> granted_at).
    grants: BTreeMap<NodeId, BTreeMap<MemberId, i64>>,

    /// Next folder id to hand out. Ids start at 1 so a raw zero never
    /// denotes a real folder, matching the SQLite backend.
    next_folder: u64,

    /// Next member id to hand out.
    next_member: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                folders: BTreeMap::new(),
                members: BTreeMap::new(),
                grants: BTreeMap::new(),
                next_folder: 1,
                next_member: 1,
            }),
        }
    }

    /// Acquire the inner state for reading. A poisoned lock surfaces
    /// as a store error, same as the SQLite backend's connection
    /// helper; it must never read as an authorization decision.
    fn read_inner(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::InvalidData(format!("lock poisoned: {}", e)))
    }

    /// Acquire the inner state for writing.
    fn write_inner(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::InvalidData(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    /// Walk ancestors of `start`, checking whether `target` appears.
    /// Parent links in here are acyclic by construction, so a plain
    /// loop terminates.
    fn is_ancestor_or_self(&self, target: NodeId, start: NodeId) -> bool {
        let mut current = Some(start);
        while let Some(id) = current {
            if id == target {
                return true;
            }
            current = self.folders.get(&id).and_then(|f| f.parent);
        }
        false
    }
}

impl FolderStore for MemoryStore {
    fn create_folder(&self, name: &str, parent: Option<NodeId>) -> Result<NodeId> {
        let mut inner = self.write_inner()?;

        if let Some(parent_id) = parent {
            if !inner.folders.contains_key(&parent_id) {
                return Err(StoreError::NotFound(format!("folder {}", parent_id)));
            }
        }

        let id = NodeId::from_raw(inner.next_folder);
        inner.next_folder += 1;
        inner.folders.insert(
            id,
            Folder {
                id,
                name: name.to_string(),
                parent,
                created_at: now_millis(),
            },
        );

        Ok(id)
    }

    fn get_folder(&self, id: NodeId) -> Result<Option<Folder>> {
        let inner = self.read_inner()?;
        Ok(inner.folders.get(&id).cloned())
    }

    fn move_folder(&self, id: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        let mut inner = self.write_inner()?;

        if !inner.folders.contains_key(&id) {
            return Err(StoreError::NotFound(format!("folder {}", id)));
        }

        if let Some(parent_id) = new_parent {
            if !inner.folders.contains_key(&parent_id) {
                return Err(StoreError::NotFound(format!("folder {}", parent_id)));
            }
            if inner.is_ancestor_or_self(id, parent_id) {
                return Err(StoreError::WouldCreateCycle {
                    folder: id,
                    new_parent: parent_id,
                });
            }
        }

        if let Some(folder) = inner.folders.get_mut(&id) {
            folder.parent = new_parent;
        }

        Ok(())
    }

    fn list_children(&self, parent: Option<NodeId>) -> Result<Vec<Folder>> {
        let inner = self.read_inner()?;
        Ok(inner
            .folders
            .values()
            .filter(|f| f.parent == parent)
            .cloned()
            .collect())
    }

    fn add_member(&self, name: &str, email: Option<&str>) -> Result<MemberId> {
        let mut inner = self.write_inner()?;

        let id = MemberId::from_raw(inner.next_member);
        inner.next_member += 1;
        inner.members.insert(
            id,
            Member {
                id,
                name: name.to_string(),
                email: email.map(str::to_string),
                created_at: now_millis(),
            },
        );

        Ok(id)
    }

    fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        let inner = self.read_inner()?;
        Ok(inner.members.get(&id).cloned())
    }

    fn add_grant(&self, folder: NodeId, member: MemberId) -> Result<GrantOutcome> {
        let mut inner = self.write_inner()?;

        if !inner.folders.contains_key(&folder) {
            return Err(StoreError::NotFound(format!("folder {}", folder)));
        }
        if !inner.members.contains_key(&member) {
            return Err(StoreError::NotFound(format!("member {}", member)));
        }

        let folder_grants = inner.grants.entry(folder).or_default();
        if folder_grants.contains_key(&member) {
            return Ok(GrantOutcome::AlreadyGranted);
        }

        folder_grants.insert(member, now_millis());
        Ok(GrantOutcome::Granted)
    }

    fn remove_grant(&self, folder: NodeId, member: MemberId) -> Result<bool> {
        let mut inner = self.write_inner()?;
        Ok(inner
            .grants
            .get_mut(&folder)
            .map(|g| g.remove(&member).is_some())
            .unwrap_or(false))
    }

    fn grants(&self, folder: NodeId) -> Result<Vec<MemberGrant>> {
        let inner = self.read_inner()?;
        Ok(inner
            .grants
            .get(&folder)
            .map(|g| {
                g.iter()
                    .map(|(&member, &granted_at)| MemberGrant::new(folder, member, granted_at))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn folders_granted_to(&self, member: MemberId) -> Result<Vec<NodeId>> {
        let inner = self.read_inner()?;
        Ok(inner
            .grants
            .iter()
            .filter(|(_, g)| g.contains_key(&member))
            .map(|(&folder, _)| folder)
            .collect())
    }
}

impl NodeProvider for MemoryStore {
    fn parent(&self, node: NodeId) -> std::result::Result<Option<NodeId>, ProviderError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| ProviderError::Unavailable(format!("lock poisoned: {}", e)))?;
        Ok(inner.folders.get(&node).and_then(|f| f.parent))
    }

    fn direct_grants(
        &self,
        node: NodeId,
    ) -> std::result::Result<BTreeSet<MemberId>, ProviderError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| ProviderError::Unavailable(format!("lock poisoned: {}", e)))?;
        Ok(inner
            .grants
            .get(&node)
            .map(|g| g.keys().copied().collect())
            .unwrap_or_default())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
