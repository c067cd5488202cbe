//! Folder records.
//!
//! A folder is a node in a strict containment tree. The parent link is
//! the only structural relationship; cycle-freedom is the store's
//! responsibility, the resolver only defends against violations.

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// A saved folder in the hierarchy.
///
/// An unsaved folder has no `Folder` record at all; APIs that must
/// accept "possibly unsaved" take `Option<NodeId>` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// The folder's identifier.
    pub id: NodeId,

    /// Display name.
    pub name: String,

    /// Parent folder, or `None` for a top-level folder.
    pub parent: Option<NodeId>,

    /// When the folder was created (Unix ms).
    pub created_at: i64,
}

impl Folder {
    /// Whether this folder sits at the top of the tree.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}
