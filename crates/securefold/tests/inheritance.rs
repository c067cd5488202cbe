//! Integration tests for inherited folder permissions.
//!
//! Exercises the full stack (store -> resolver -> facade) against the
//! behavioral contract: effective access is the union of a folder's
//! own grants and every ancestor's grants, inheritance excludes the
//! folder's own set, and anonymous access is always denied.

use proptest::prelude::*;

use securefold::{AccessControl, GrantOutcome, MemberId, MemoryStore, SqliteStore};
use securefold_testkit::generators::{build_tree, tree_params, TreeParams};
use securefold_testkit::three_level_tree;

use std::collections::BTreeSet;

fn set(ids: &[MemberId]) -> BTreeSet<MemberId> {
    ids.iter().copied().collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn root_grants_are_its_effective_set() {
    init_tracing();
    let ac = AccessControl::new(MemoryStore::new());
    let root = ac.create_folder("root", None).unwrap();
    let m1 = ac.add_member("M1", None).unwrap();
    ac.grant_view(root, m1).unwrap();

    assert_eq!(ac.effective_members(Some(root)).unwrap(), set(&[m1]));
    assert!(ac.inherited_members(Some(root)).unwrap().is_empty());
}

#[test]
fn child_unions_parent_grants() {
    let ac = AccessControl::new(MemoryStore::new());
    let root = ac.create_folder("root", None).unwrap();
    let child = ac.create_folder("child", Some(root)).unwrap();
    let m1 = ac.add_member("M1", None).unwrap();
    let m2 = ac.add_member("M2", None).unwrap();
    ac.grant_view(root, m1).unwrap();
    ac.grant_view(child, m2).unwrap();

    assert_eq!(ac.effective_members(Some(child)).unwrap(), set(&[m1, m2]));
    assert_eq!(ac.inherited_members(Some(child)).unwrap(), set(&[m1]));
}

#[test]
fn grandchild_with_no_grants_inherits_everything() {
    let tree = three_level_tree();
    let ac = AccessControl::new(tree.fixture.store);
    let m3 = ac.add_member("M3", None).unwrap();

    assert_eq!(
        ac.effective_members(Some(tree.grandchild)).unwrap(),
        set(&[tree.m1, tree.m2])
    );
    assert!(ac.can_view(Some(tree.grandchild), Some(tree.m1)).unwrap());
    assert!(!ac.can_view(Some(tree.grandchild), Some(m3)).unwrap());
}

#[test]
fn unsaved_folder_has_no_permissions() {
    let tree = three_level_tree();
    let ac = AccessControl::new(tree.fixture.store);

    assert!(ac.effective_members(None).unwrap().is_empty());
    assert!(!ac.can_view(None, Some(tree.m1)).unwrap());
}

#[test]
fn anonymous_is_denied_even_where_grants_exist() {
    let tree = three_level_tree();
    let ac = AccessControl::new(tree.fixture.store);

    assert!(!ac.effective_members(Some(tree.child)).unwrap().is_empty());
    assert!(!ac.can_view(Some(tree.child), None).unwrap());
}

#[test]
fn revocation_is_visible_on_next_resolution() {
    init_tracing();
    let tree = three_level_tree();
    let ac = AccessControl::new(tree.fixture.store);

    assert_eq!(
        ac.effective_members(Some(tree.grandchild)).unwrap(),
        set(&[tree.m1, tree.m2])
    );

    assert!(ac.revoke_view(tree.root, tree.m1).unwrap());

    assert_eq!(
        ac.effective_members(Some(tree.grandchild)).unwrap(),
        set(&[tree.m2])
    );
    assert!(!ac.can_view(Some(tree.grandchild), Some(tree.m1)).unwrap());
}

#[test]
fn descendant_grant_cannot_narrow_ancestor_access() {
    // No deny primitive: revoking on the child leaves the root grant
    // flowing down untouched.
    let ac = AccessControl::new(MemoryStore::new());
    let root = ac.create_folder("root", None).unwrap();
    let child = ac.create_folder("child", Some(root)).unwrap();
    let m1 = ac.add_member("M1", None).unwrap();

    ac.grant_view(root, m1).unwrap();
    ac.grant_view(child, m1).unwrap();
    ac.revoke_view(child, m1).unwrap();

    assert!(ac.can_view(Some(child), Some(m1)).unwrap());
}

#[test]
fn grant_is_idempotent_through_the_facade() {
    let ac = AccessControl::new(MemoryStore::new());
    let folder = ac.create_folder("root", None).unwrap();
    let m1 = ac.add_member("M1", None).unwrap();

    assert_eq!(ac.grant_view(folder, m1).unwrap(), GrantOutcome::Granted);
    assert_eq!(
        ac.grant_view(folder, m1).unwrap(),
        GrantOutcome::AlreadyGranted
    );
    assert_eq!(ac.grants(folder).unwrap().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend parity
// ─────────────────────────────────────────────────────────────────────────────

/// Resolution must not depend on the backend: the same tree built on
/// memory and SQLite yields identical effective sets everywhere.
#[test]
fn memory_and_sqlite_resolve_identically() {
    let params = TreeParams {
        parents: vec![None, Some(0), Some(1), Some(0), None],
        member_count: 3,
        grants: vec![(0, 0), (1, 1), (3, 2), (4, 0), (4, 2)],
    };

    let memory = MemoryStore::new();
    let mem_tree = build_tree(&memory, &params);
    let mem_ac = AccessControl::new(memory);

    let sqlite = SqliteStore::open_memory().unwrap();
    let sql_tree = build_tree(&sqlite, &params);
    let sql_ac = AccessControl::new(sqlite);

    for (m, s) in mem_tree.folders.iter().zip(&sql_tree.folders) {
        let mem_effective: Vec<u64> = mem_ac
            .effective_members(Some(*m))
            .unwrap()
            .iter()
            .map(|id| id.as_u64())
            .collect();
        let sql_effective: Vec<u64> = sql_ac
            .effective_members(Some(*s))
            .unwrap()
            .iter()
            .map(|id| id.as_u64())
            .collect();
        assert_eq!(mem_effective, sql_effective);
    }
}

#[test]
fn sqlite_resolution_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("securefold.db");

    let (root, child, m1) = {
        let ac = AccessControl::new(SqliteStore::open(&path).unwrap());
        let root = ac.create_folder("root", None).unwrap();
        let child = ac.create_folder("child", Some(root)).unwrap();
        let m1 = ac.add_member("M1", None).unwrap();
        ac.grant_view(root, m1).unwrap();
        (root, child, m1)
    };

    let ac = AccessControl::new(SqliteStore::open(&path).unwrap());
    assert!(ac.can_view(Some(child), Some(m1)).unwrap());
    assert_eq!(ac.effective_members(Some(root)).unwrap(), set(&[m1]));
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    /// EffectiveMembers(N) is a superset of DirectGrants(N).
    #[test]
    fn effective_contains_direct(params in tree_params(16, 4, 32)) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let ac = AccessControl::new(store);

        for &folder in &tree.folders {
            let direct = ac.direct_grants(Some(folder)).unwrap();
            let effective = ac.effective_members(Some(folder)).unwrap();
            prop_assert!(direct.is_subset(&effective));
        }
    }

    /// EffectiveMembers(N) = DirectGrants(N) ∪ EffectiveMembers(parent(N)).
    #[test]
    fn effective_decomposes_over_parent(params in tree_params(16, 4, 32)) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let ac = AccessControl::new(store);

        for &folder in &tree.folders {
            let parent = ac.get_folder(folder).unwrap().unwrap().parent;
            let mut expected = ac.direct_grants(Some(folder)).unwrap();
            expected.extend(ac.effective_members(parent).unwrap());
            prop_assert_eq!(ac.effective_members(Some(folder)).unwrap(), expected);
        }
    }

    /// InheritedMembers(N) equals the parent's effective set.
    #[test]
    fn inherited_is_parent_effective(params in tree_params(16, 4, 32)) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let ac = AccessControl::new(store);

        for &folder in &tree.folders {
            let parent = ac.get_folder(folder).unwrap().unwrap().parent;
            prop_assert_eq!(
                ac.inherited_members(Some(folder)).unwrap(),
                ac.effective_members(parent).unwrap()
            );
        }
    }

    /// CanView agrees with membership in the effective set, and an
    /// absent identity is always denied.
    #[test]
    fn can_view_matches_effective(params in tree_params(12, 4, 24)) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let ac = AccessControl::new(store);

        for &folder in &tree.folders {
            let effective = ac.effective_members(Some(folder)).unwrap();
            for &member in &tree.members {
                prop_assert_eq!(
                    ac.can_view(Some(folder), Some(member)).unwrap(),
                    effective.contains(&member)
                );
            }
            prop_assert!(!ac.can_view(Some(folder), None).unwrap());
        }
    }

    /// Adding a grant anywhere can only grow effective sets.
    #[test]
    fn grants_are_monotone(
        params in tree_params(12, 4, 24),
        extra_folder in 0usize..12,
        extra_member in 0usize..4,
    ) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let folder = tree.folders[extra_folder % tree.folders.len()];
        let member = tree.members[extra_member % tree.members.len()];
        let ac = AccessControl::new(store);

        let before: Vec<_> = tree
            .folders
            .iter()
            .map(|&f| ac.effective_members(Some(f)).unwrap())
            .collect();

        ac.grant_view(folder, member).unwrap();

        for (&f, old) in tree.folders.iter().zip(&before) {
            let new = ac.effective_members(Some(f)).unwrap();
            prop_assert!(old.is_subset(&new));
        }
    }

    /// Resolution without intervening mutation is idempotent.
    #[test]
    fn resolution_is_idempotent(params in tree_params(12, 4, 24)) {
        let store = MemoryStore::new();
        let tree = build_tree(&store, &params);
        let ac = AccessControl::new(store);

        for &folder in &tree.folders {
            let first = ac.effective_members(Some(folder)).unwrap();
            let second = ac.effective_members(Some(folder)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
