//! # Securefold Resolver
//!
//! Hierarchical permission resolution: derives who may view a folder
//! from direct grants and ancestor inheritance.
//!
//! ## Overview
//!
//! A folder optionally carries a set of members permitted to view it.
//! Permission flows down the tree: every member granted on an ancestor
//! may also view the descendants. The resolver answers four questions
//! over any [`NodeProvider`](securefold_core::NodeProvider):
//!
//! - **Effective members**: own grants plus all ancestors' grants
//! - **Inherited members**: the parent's effective set (what survives
//!   if the folder's own grants are cleared)
//! - **Can view**: boolean check for one member
//! - **Direct grants**: the folder's own set, no traversal
//!
//! ## Model
//!
//! Grants are additive only. There is no deny primitive, so a
//! descendant can widen access but never narrow it. An absent member
//! identity (anonymous request) is always denied, and an unsaved
//! folder resolves to no permissions. Corrupted parent links (cycles,
//! absurd depths) fail fast with a distinct error instead of looping.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use securefold_resolver::PermissionResolver;
//!
//! let resolver = PermissionResolver::new(&store);
//! let everyone = resolver.effective_members(Some(folder_id))?;
//! let allowed = resolver.can_view(Some(folder_id), Some(member_id))?;
//! ```

pub mod error;
pub mod resolver;

pub use error::{ResolveError, Result};
pub use resolver::{PermissionResolver, DEFAULT_MAX_DEPTH};
