//! # Securefold Testkit
//!
//! Testing utilities for securefold.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Helper structs for setting up folder trees with grants
//! - **Generators**: Proptest strategies producing random well-formed trees
//!
//! ## Fixtures
//!
//! ```rust
//! use securefold_testkit::fixtures::three_level_tree;
//!
//! let tree = three_level_tree();
//! let resolver = tree.fixture.resolver();
//! assert!(resolver.can_view(Some(tree.grandchild), Some(tree.m1)).unwrap());
//! ```
//!
//! ## Property Testing
//!
//! Generated trees are acyclic by construction (every parent index is
//! smaller than its child's), so resolution properties can be checked
//! without ever tripping the defensive cycle guards:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use securefold_store::MemoryStore;
//! use securefold_testkit::generators::{build_tree, tree_params};
//!
//! proptest! {
//!     #[test]
//!     fn effective_contains_direct(params in tree_params(16, 4, 32)) {
//!         let store = MemoryStore::new();
//!         let tree = build_tree(&store, &params);
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{three_level_tree, TestFixture, ThreeLevelTree};
pub use generators::{build_tree, tree_params, BuiltTree, TreeParams};
