//! SQLite implementation of the FolderStore trait.
//!
//! This is the primary storage backend for securefold. It uses
//! rusqlite with bundled SQLite behind an internal mutex.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use securefold_core::{
    Folder, Member, MemberGrant, MemberId, NodeId, NodeProvider, ProviderError,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{FolderStore, GrantOutcome};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex; all operations are synchronous,
/// matching the resolver's read path.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute an operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::InvalidData(format!("mutex poisoned: {}", e)))?;
        f(&conn)
    }

    fn folder_exists(conn: &Connection, id: NodeId) -> Result<bool> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM folders WHERE folder_id = ?1",
                params![id.as_u64() as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(exists.is_some())
    }

    fn member_exists(conn: &Connection, id: MemberId) -> Result<bool> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM members WHERE member_id = ?1",
                params![id.as_u64() as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(exists.is_some())
    }

    fn parent_of(conn: &Connection, id: NodeId) -> Result<Option<NodeId>> {
        let parent: Option<Option<i64>> = conn
            .query_row(
                "SELECT parent_id FROM folders WHERE folder_id = ?1",
                params![id.as_u64() as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(parent.flatten().map(|p| NodeId::from_raw(p as u64)))
    }

    /// Walk ancestors of `start` looking for `target`. Bounded by the
    /// schema's referential integrity; a corrupted file could still
    /// loop, so the walk carries a visited check.
    fn is_ancestor_or_self(conn: &Connection, target: NodeId, start: NodeId) -> Result<bool> {
        let mut visited = BTreeSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if id == target {
                return Ok(true);
            }
            if !visited.insert(id) {
                return Err(StoreError::InvalidData(format!(
                    "parent cycle in folders table at {}",
                    id
                )));
            }
            current = Self::parent_of(conn, id)?;
        }
        Ok(false)
    }
}

// Helper to convert a row to Folder
fn row_to_folder(row: &rusqlite::Row<'_>) -> rusqlite::Result<Folder> {
    let id: i64 = row.get("folder_id")?;
    let parent: Option<i64> = row.get("parent_id")?;
    Ok(Folder {
        id: NodeId::from_raw(id as u64),
        name: row.get("name")?,
        parent: parent.map(|p| NodeId::from_raw(p as u64)),
        created_at: row.get("created_at")?,
    })
}

// Helper to convert a row to Member
fn row_to_member(row: &rusqlite::Row<'_>) -> rusqlite::Result<Member> {
    let id: i64 = row.get("member_id")?;
    Ok(Member {
        id: MemberId::from_raw(id as u64),
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
    })
}

impl FolderStore for SqliteStore {
    fn create_folder(&self, name: &str, parent: Option<NodeId>) -> Result<NodeId> {
        self.with_conn(|conn| {
            if let Some(parent_id) = parent {
                if !Self::folder_exists(conn, parent_id)? {
                    return Err(StoreError::NotFound(format!("folder {}", parent_id)));
                }
            }

            conn.execute(
                "INSERT INTO folders (name, parent_id, created_at) VALUES (?1, ?2, ?3)",
                params![
                    name,
                    parent.map(|p| p.as_u64() as i64),
                    now_millis()
                ],
            )?;

            Ok(NodeId::from_raw(conn.last_insert_rowid() as u64))
        })
    }

    fn get_folder(&self, id: NodeId) -> Result<Option<Folder>> {
        self.with_conn(|conn| {
            let folder = conn
                .query_row(
                    "SELECT folder_id, name, parent_id, created_at
                     FROM folders WHERE folder_id = ?1",
                    params![id.as_u64() as i64],
                    row_to_folder,
                )
                .optional()?;
            Ok(folder)
        })
    }

    fn move_folder(&self, id: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        self.with_conn(|conn| {
            if !Self::folder_exists(conn, id)? {
                return Err(StoreError::NotFound(format!("folder {}", id)));
            }

            if let Some(parent_id) = new_parent {
                if !Self::folder_exists(conn, parent_id)? {
                    return Err(StoreError::NotFound(format!("folder {}", parent_id)));
                }
                if Self::is_ancestor_or_self(conn, id, parent_id)? {
                    return Err(StoreError::WouldCreateCycle {
                        folder: id,
                        new_parent: parent_id,
                    });
                }
            }

            conn.execute(
                "UPDATE folders SET parent_id = ?1 WHERE folder_id = ?2",
                params![new_parent.map(|p| p.as_u64() as i64), id.as_u64() as i64],
            )?;

            Ok(())
        })
    }

    fn list_children(&self, parent: Option<NodeId>) -> Result<Vec<Folder>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT folder_id, name, parent_id, created_at
                 FROM folders
                 WHERE parent_id IS ?1
                 ORDER BY folder_id",
            )?;
            let folders = stmt
                .query_map(params![parent.map(|p| p.as_u64() as i64)], row_to_folder)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(folders)
        })
    }

    fn add_member(&self, name: &str, email: Option<&str>) -> Result<MemberId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO members (name, email, created_at) VALUES (?1, ?2, ?3)",
                params![name, email, now_millis()],
            )?;
            Ok(MemberId::from_raw(conn.last_insert_rowid() as u64))
        })
    }

    fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        self.with_conn(|conn| {
            let member = conn
                .query_row(
                    "SELECT member_id, name, email, created_at
                     FROM members WHERE member_id = ?1",
                    params![id.as_u64() as i64],
                    row_to_member,
                )
                .optional()?;
            Ok(member)
        })
    }

    fn add_grant(&self, folder: NodeId, member: MemberId) -> Result<GrantOutcome> {
        self.with_conn(|conn| {
            if !Self::folder_exists(conn, folder)? {
                return Err(StoreError::NotFound(format!("folder {}", folder)));
            }
            if !Self::member_exists(conn, member)? {
                return Err(StoreError::NotFound(format!("member {}", member)));
            }

            let inserted = conn.execute(
                "INSERT OR IGNORE INTO member_grants (folder_id, member_id, granted_at)
                 VALUES (?1, ?2, ?3)",
                params![
                    folder.as_u64() as i64,
                    member.as_u64() as i64,
                    now_millis()
                ],
            )?;

            if inserted > 0 {
                Ok(GrantOutcome::Granted)
            } else {
                Ok(GrantOutcome::AlreadyGranted)
            }
        })
    }

    fn remove_grant(&self, folder: NodeId, member: MemberId) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM member_grants WHERE folder_id = ?1 AND member_id = ?2",
                params![folder.as_u64() as i64, member.as_u64() as i64],
            )?;
            Ok(removed > 0)
        })
    }

    fn grants(&self, folder: NodeId) -> Result<Vec<MemberGrant>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT member_id, granted_at FROM member_grants
                 WHERE folder_id = ?1 ORDER BY member_id",
            )?;
            let grants = stmt
                .query_map(params![folder.as_u64() as i64], |row| {
                    let member: i64 = row.get("member_id")?;
                    let granted_at: i64 = row.get("granted_at")?;
                    Ok(MemberGrant::new(
                        folder,
                        MemberId::from_raw(member as u64),
                        granted_at,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(grants)
        })
    }

    fn folders_granted_to(&self, member: MemberId) -> Result<Vec<NodeId>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT folder_id FROM member_grants
                 WHERE member_id = ?1 ORDER BY folder_id",
            )?;
            let folders = stmt
                .query_map(params![member.as_u64() as i64], |row| {
                    let id: i64 = row.get(0)?;
                    Ok(NodeId::from_raw(id as u64))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(folders)
        })
    }
}

impl NodeProvider for SqliteStore {
    fn parent(&self, node: NodeId) -> std::result::Result<Option<NodeId>, ProviderError> {
        self.with_conn(|conn| Self::parent_of(conn, node))
            .map_err(Into::into)
    }

    fn direct_grants(
        &self,
        node: NodeId,
    ) -> std::result::Result<BTreeSet<MemberId>, ProviderError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT member_id FROM member_grants WHERE folder_id = ?1",
            )?;
            let members = stmt
                .query_map(params![node.as_u64() as i64], |row| {
                    let id: i64 = row.get(0)?;
                    Ok(MemberId::from_raw(id as u64))
                })?
                .collect::<std::result::Result<BTreeSet<_>, _>>()?;
            Ok(members)
        })
        .map_err(Into::into)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store_basic() {
        let store = SqliteStore::open_memory().unwrap();
        let root = store.create_folder("assets", None).unwrap();
        let child = store.create_folder("reports", Some(root)).unwrap();

        let fetched = store.get_folder(child).unwrap().unwrap();
        assert_eq!(fetched.name, "reports");
        assert_eq!(fetched.parent, Some(root));
        assert_eq!(store.parent(child).unwrap(), Some(root));
    }

    #[test]
    fn test_sqlite_grant_idempotent() {
        let store = SqliteStore::open_memory().unwrap();
        let folder = store.create_folder("assets", None).unwrap();
        let member = store.add_member("Ada", Some("ada@example.org")).unwrap();

        assert_eq!(store.add_grant(folder, member).unwrap(), GrantOutcome::Granted);
        assert_eq!(
            store.add_grant(folder, member).unwrap(),
            GrantOutcome::AlreadyGranted
        );

        let grants = store.grants(folder).unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].member, member);
    }

    #[test]
    fn test_sqlite_move_folder_refuses_cycle() {
        let store = SqliteStore::open_memory().unwrap();
        let a = store.create_folder("a", None).unwrap();
        let b = store.create_folder("b", Some(a)).unwrap();

        assert!(matches!(
            store.move_folder(a, Some(b)),
            Err(StoreError::WouldCreateCycle { .. })
        ));
    }

    #[test]
    fn test_sqlite_list_children() {
        let store = SqliteStore::open_memory().unwrap();
        let root = store.create_folder("assets", None).unwrap();
        let a = store.create_folder("a", Some(root)).unwrap();
        let b = store.create_folder("b", Some(root)).unwrap();

        let children: Vec<NodeId> = store
            .list_children(Some(root))
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(children, vec![a, b]);

        let top: Vec<NodeId> = store
            .list_children(None)
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(top, vec![root]);
    }

    #[test]
    fn test_sqlite_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("securefold.db");

        let folder = {
            let store = SqliteStore::open(&path).unwrap();
            let folder = store.create_folder("assets", None).unwrap();
            let member = store.add_member("Ada", None).unwrap();
            store.add_grant(folder, member).unwrap();
            folder
        };

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.direct_grants(folder).unwrap().len(), 1);
    }
}
