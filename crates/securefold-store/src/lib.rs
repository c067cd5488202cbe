//! # Securefold Store
//!
//! Storage abstraction for securefold. Provides a trait-based
//! interface for folder, member, and grant persistence with SQLite
//! and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts persistence behind the [`FolderStore`]
//! trait. The primary implementation is [`SqliteStore`], with
//! [`MemoryStore`] for tests and embedding. Every store is also a
//! [`NodeProvider`](securefold_core::NodeProvider), the read-only
//! slice the permission resolver consumes.
//!
//! ## Key Types
//!
//! - [`FolderStore`] - The trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`GrantOutcome`] - Result of adding a grant
//!
//! ## Usage
//!
//! ```rust,no_run
//! use securefold_store::{FolderStore, SqliteStore};
//!
//! let store = SqliteStore::open("securefold.db").unwrap();
//! let folder = store.create_folder("reports", None).unwrap();
//! let member = store.add_member("Ada", None).unwrap();
//! store.add_grant(folder, member).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent grants**: granting the same pair twice returns `AlreadyGranted`
//! - **Acyclic by construction**: re-parenting refuses to create cycles
//! - **Absence is not an error**: unknown nodes resolve to no parent and no grants

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{FolderStore, GrantOutcome};
