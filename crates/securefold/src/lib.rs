//! # Securefold
//!
//! Member-based access control for hierarchical folder storage.
//!
//! ## Overview
//!
//! A folder may declare a set of members permitted to view it, and
//! permission is inherited down the folder tree: anyone granted on an
//! ancestor may view every descendant. Grants are additive only; there
//! is no deny record and a descendant cannot revoke an ancestor's
//! grant.
//!
//! The workspace splits into:
//!
//! - `securefold-core` - identifiers, records, and the provider contract
//! - `securefold-resolver` - the hierarchical permission resolver
//! - `securefold-store` - SQLite and in-memory persistence
//! - `securefold` (this crate) - the unified [`AccessControl`] facade
//!
//! ## Usage
//!
//! ```rust
//! use securefold::{AccessControl, MemoryStore};
//!
//! let ac = AccessControl::new(MemoryStore::new());
//!
//! let root = ac.create_folder("assets", None).unwrap();
//! let reports = ac.create_folder("reports", Some(root)).unwrap();
//! let ada = ac.add_member("Ada", None).unwrap();
//!
//! // Granting on the root covers every descendant.
//! ac.grant_view(root, ada).unwrap();
//! assert!(ac.can_view(Some(reports), Some(ada)).unwrap());
//!
//! // Anonymous requests are always denied.
//! assert!(!ac.can_view(Some(reports), None).unwrap());
//! ```

pub mod access;
pub mod error;

pub use access::{AccessConfig, AccessControl};
pub use error::{AccessError, Result};

pub use securefold_core::{Folder, Member, MemberGrant, MemberId, NodeId, NodeProvider};
pub use securefold_resolver::{PermissionResolver, ResolveError, DEFAULT_MAX_DEPTH};
pub use securefold_store::{FolderStore, GrantOutcome, MemoryStore, SqliteStore, StoreError};
