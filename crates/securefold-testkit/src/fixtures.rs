//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Panics on store errors;
//! this is test-only code.

use securefold_core::{MemberId, NodeId};
use securefold_resolver::PermissionResolver;
use securefold_store::{FolderStore, MemoryStore};

/// A test fixture wrapping a memory store.
pub struct TestFixture {
    pub store: MemoryStore,
}

impl TestFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// Create a folder, panicking on failure.
    pub fn folder(&self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.store
            .create_folder(name, parent)
            .expect("create_folder failed")
    }

    /// Create a member, panicking on failure.
    pub fn member(&self, name: &str) -> MemberId {
        self.store.add_member(name, None).expect("add_member failed")
    }

    /// Grant view access, panicking on failure.
    pub fn grant(&self, folder: NodeId, member: MemberId) {
        self.store.add_grant(folder, member).expect("add_grant failed");
    }

    /// A resolver borrowing this fixture's store.
    pub fn resolver(&self) -> PermissionResolver<&MemoryStore> {
        PermissionResolver::new(&self.store)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical three-level scenario: a root granting M1, a child
/// granting M2, and a grandchild granting nothing.
pub struct ThreeLevelTree {
    pub fixture: TestFixture,
    pub root: NodeId,
    pub child: NodeId,
    pub grandchild: NodeId,
    pub m1: MemberId,
    pub m2: MemberId,
}

/// Build the three-level scenario used throughout the test suites.
pub fn three_level_tree() -> ThreeLevelTree {
    let fixture = TestFixture::new();

    let root = fixture.folder("root", None);
    let child = fixture.folder("child", Some(root));
    let grandchild = fixture.folder("grandchild", Some(child));

    let m1 = fixture.member("M1");
    let m2 = fixture.member("M2");

    fixture.grant(root, m1);
    fixture.grant(child, m2);

    ThreeLevelTree {
        fixture,
        root,
        child,
        grandchild,
        m1,
        m2,
    }
}
