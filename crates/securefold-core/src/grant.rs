//! Member grants.
//!
//! A grant is the direct authorization record linking a member to a
//! folder: "this member may view this folder". Grants are additive
//! only; there is no deny record, and a descendant folder can never
//! revoke what an ancestor granted.

use serde::{Deserialize, Serialize};

use crate::types::{MemberId, NodeId};

/// A direct view grant on a folder.
///
/// Grants form a set per folder: at most one grant exists per
/// (folder, member) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberGrant {
    /// The folder the grant applies to.
    pub folder: NodeId,

    /// The member being granted view access.
    pub member: MemberId,

    /// When the grant was recorded (Unix ms).
    pub granted_at: i64,
}

impl MemberGrant {
    /// Create a new grant record.
    pub fn new(folder: NodeId, member: MemberId, granted_at: i64) -> Self {
        Self {
            folder,
            member,
            granted_at,
        }
    }
}
