//! # Securefold Core
//!
//! Pure primitives for securefold: folder and member identifiers,
//! grant records, and the provider contract over the folder tree.
//!
//! This crate contains no I/O and no storage. It is plain data plus
//! the one trait everything else is written against.
//!
//! ## Key Types
//!
//! - [`NodeId`] / [`MemberId`] - Newtype identifiers
//! - [`Folder`] - A node in the containment tree
//! - [`Member`] - An account that can be granted folder access
//! - [`MemberGrant`] - A direct view grant on a folder
//! - [`NodeProvider`] - Read-only adjacency contract used by the resolver

pub mod error;
pub mod folder;
pub mod grant;
pub mod member;
pub mod provider;
pub mod types;

pub use error::ProviderError;
pub use folder::Folder;
pub use grant::MemberGrant;
pub use member::Member;
pub use provider::NodeProvider;
pub use types::{MemberId, NodeId};
