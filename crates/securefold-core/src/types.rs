//! Strong type definitions for securefold.
//!
//! All identifiers are newtypes to prevent misuse at compile time: a
//! folder id and a member id are both integers in storage, but they
//! must never be interchangeable in code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a folder (a node in the containment tree).
///
/// Real folders always have an id; an unsaved folder has none, which is
/// modelled as `Option<NodeId>` at API boundaries rather than a zero
/// sentinel value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a NodeId from a raw integer.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a member (an account that can be granted folder access).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u64);

impl MemberId {
    /// Create a MemberId from a raw integer.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MemberId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
