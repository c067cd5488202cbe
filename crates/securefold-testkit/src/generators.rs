//! Proptest generators for property-based testing.
//!
//! Trees are generated acyclic by construction: every folder's parent
//! has a strictly smaller index, so parent links always terminate.

use proptest::prelude::*;

use securefold_core::{MemberId, NodeId};
use securefold_store::FolderStore;

/// Parameters for generating a folder tree with grants.
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// `parents[i]` is the index of folder i's parent, always `< i`.
    /// `None` means top-level. Index 0 is always top-level.
    pub parents: Vec<Option<usize>>,

    /// Number of members to create.
    pub member_count: usize,

    /// Direct grants as (folder index, member index) pairs.
    /// Duplicates are fine; grants are a set.
    pub grants: Vec<(usize, usize)>,
}

/// Strategy producing well-formed tree parameters.
pub fn tree_params(
    max_folders: usize,
    max_members: usize,
    max_grants: usize,
) -> impl Strategy<Value = TreeParams> {
    (1..=max_folders, 1..=max_members).prop_flat_map(move |(folder_count, member_count)| {
        let parents: Vec<BoxedStrategy<Option<usize>>> = (0..folder_count)
            .map(|i| {
                if i == 0 {
                    Just(None).boxed()
                } else {
                    prop::option::of(0..i).boxed()
                }
            })
            .collect();

        let grants =
            prop::collection::vec((0..folder_count, 0..member_count), 0..=max_grants);

        (parents, grants).prop_map(move |(parents, grants)| TreeParams {
            parents,
            member_count,
            grants,
        })
    })
}

/// A tree materialized into a store.
pub struct BuiltTree {
    /// Folder ids, indexed like `TreeParams::parents`.
    pub folders: Vec<NodeId>,

    /// Member ids, indexed like the member indexes in `TreeParams::grants`.
    pub members: Vec<MemberId>,
}

/// Materialize tree parameters into a store.
///
/// Works against any backend, which makes cross-backend parity tests
/// cheap to write.
pub fn build_tree<S: FolderStore>(store: &S, params: &TreeParams) -> BuiltTree {
    let mut folders: Vec<NodeId> = Vec::with_capacity(params.parents.len());
    for (i, parent_idx) in params.parents.iter().enumerate() {
        let parent = parent_idx.map(|idx| folders[idx]);
        let id = store
            .create_folder(&format!("folder-{}", i), parent)
            .expect("create_folder failed");
        folders.push(id);
    }

    let members: Vec<MemberId> = (0..params.member_count)
        .map(|i| {
            store
                .add_member(&format!("member-{}", i), None)
                .expect("add_member failed")
        })
        .collect();

    for &(folder_idx, member_idx) in &params.grants {
        store
            .add_grant(folders[folder_idx], members[member_idx])
            .expect("add_grant failed");
    }

    BuiltTree { folders, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use securefold_resolver::PermissionResolver;
    use securefold_store::MemoryStore;

    proptest! {
        #[test]
        fn generated_trees_always_resolve(params in tree_params(16, 4, 32)) {
            let store = MemoryStore::new();
            let tree = build_tree(&store, &params);
            let resolver = PermissionResolver::new(&store);

            // Acyclic by construction: resolution never errors.
            for &folder in &tree.folders {
                resolver.effective_members(Some(folder)).unwrap();
            }
        }
    }
}
