//! Parent-chain checks that keep each user's folders a bounded forest.

use async_trait::async_trait;
use sqlx::PgConnection;
use thiserror::Error;
use uuid::Uuid;

use fragments_core::error::AppError;
use fragments_core::result::AppResult;
use fragments_database::repositories::FolderRepository;

/// One-hop lookup used by the walk.
#[async_trait]
pub trait ParentLookup: Send {
    /// Parent of `folder_id` when owned by `user_id`.
    ///
    /// `None` when the folder is missing or owned by someone else,
    /// `Some(None)` for a root folder.
    async fn parent_of(&mut self, user_id: Uuid, folder_id: Uuid)
    -> AppResult<Option<Option<Uuid>>>;
}

/// Reasons a proposed parent is refused.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The parent does not exist or belongs to another user.
    #[error("Parent folder does not exist")]
    InvalidParent,
    /// A folder was asked to become its own parent.
    #[error("A folder cannot be its own parent")]
    SelfParent,
    /// The new parent is a descendant of the folder being moved.
    #[error("Circular reference: a folder cannot be moved into its own subfolder")]
    Circular,
    /// The chain to root would be longer than allowed.
    #[error("Maximum folder depth of {0} exceeded")]
    DepthExceeded(u32),
    /// The lookup itself failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<HierarchyError> for AppError {
    fn from(err: HierarchyError) -> Self {
        match err {
            HierarchyError::Store(e) => e,
            other => AppError::integrity(other.to_string()),
        }
    }
}

/// Walks parent pointers with an explicit hop counter.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyGuard {
    max_depth: u32,
}

impl HierarchyGuard {
    /// Creates a guard allowing chains of at most `max_depth` hops to root.
    ///
    /// The lookup of the proposed parent counts as the first hop, so at most
    /// `max_depth` lookups run and the parent may have up to `max_depth - 1`
    /// ancestors. A new folder therefore sits at most `max_depth` levels
    /// below a root.
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Check that `parent_id` can hold `moving` (or a new folder when
    /// `moving` is `None`).
    ///
    /// The parent must exist for `user_id`; walking upward from it must
    /// reach a root within `max_depth` hops without passing `moving`.
    pub async fn check_parent<L: ParentLookup>(
        &self,
        lookup: &mut L,
        user_id: Uuid,
        moving: Option<Uuid>,
        parent_id: Uuid,
    ) -> Result<(), HierarchyError> {
        if moving == Some(parent_id) {
            return Err(HierarchyError::SelfParent);
        }

        let mut cursor = parent_id;
        let mut hops: u32 = 0;
        loop {
            if moving == Some(cursor) {
                return Err(HierarchyError::Circular);
            }

            hops += 1;
            if hops > self.max_depth {
                return Err(HierarchyError::DepthExceeded(self.max_depth));
            }

            match lookup.parent_of(user_id, cursor).await? {
                None if hops == 1 => return Err(HierarchyError::InvalidParent),
                None | Some(None) => return Ok(()),
                Some(Some(next)) => cursor = next,
            }
        }
    }
}

/// [`ParentLookup`] over an open transaction.
pub struct TxParentLookup<'a> {
    repo: &'a FolderRepository,
    conn: &'a mut PgConnection,
}

impl<'a> TxParentLookup<'a> {
    /// Look up parents through `conn` using `repo`.
    pub fn new(repo: &'a FolderRepository, conn: &'a mut PgConnection) -> Self {
        Self { repo, conn }
    }
}

#[async_trait]
impl ParentLookup for TxParentLookup<'_> {
    async fn parent_of(
        &mut self,
        user_id: Uuid,
        folder_id: Uuid,
    ) -> AppResult<Option<Option<Uuid>>> {
        self.repo.parent_of(&mut *self.conn, user_id, folder_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use fragments_core::error::ErrorKind;

    use super::*;

    /// folder id -> (owner, parent)
    #[derive(Default)]
    struct MapLookup {
        folders: HashMap<Uuid, (Uuid, Option<Uuid>)>,
        calls: u32,
    }

    impl MapLookup {
        fn add(&mut self, owner: Uuid, parent: Option<Uuid>) -> Uuid {
            let id = Uuid::new_v4();
            self.folders.insert(id, (owner, parent));
            id
        }

        fn chain(&mut self, owner: Uuid, len: usize) -> Vec<Uuid> {
            let mut ids = Vec::with_capacity(len);
            let mut parent = None;
            for _ in 0..len {
                let id = self.add(owner, parent);
                ids.push(id);
                parent = Some(id);
            }
            ids
        }
    }

    #[async_trait]
    impl ParentLookup for MapLookup {
        async fn parent_of(
            &mut self,
            user_id: Uuid,
            folder_id: Uuid,
        ) -> AppResult<Option<Option<Uuid>>> {
            self.calls += 1;
            Ok(self
                .folders
                .get(&folder_id)
                .filter(|(owner, _)| *owner == user_id)
                .map(|(_, parent)| *parent))
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl ParentLookup for FailingLookup {
        async fn parent_of(&mut self, _: Uuid, _: Uuid) -> AppResult<Option<Option<Uuid>>> {
            Err(AppError::database("connection reset"))
        }
    }

    #[tokio::test]
    async fn nested_parent_is_accepted() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let chain = lookup.chain(owner, 3);

        let guard = HierarchyGuard::new(50);
        assert!(guard
            .check_parent(&mut lookup, owner, None, chain[2])
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn missing_parent_is_invalid() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();

        let err = HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, None, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidParent));
    }

    #[tokio::test]
    async fn foreign_parent_is_invalid() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let theirs = lookup.add(stranger, None);

        let err = HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, None, theirs)
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidParent));
    }

    #[tokio::test]
    async fn own_parent_is_rejected() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let a = lookup.add(owner, None);

        let err = HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, Some(a), a)
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::SelfParent));
        assert_eq!(lookup.calls, 0);
    }

    #[tokio::test]
    async fn moving_under_a_descendant_is_circular() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        // a (root) <- b <- c
        let chain = lookup.chain(owner, 3);
        let (a, c) = (chain[0], chain[2]);

        let err = HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, Some(a), c)
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::Circular));
    }

    #[tokio::test]
    async fn moving_into_a_sibling_tree_is_fine() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let a = lookup.add(owner, None);
        let b = lookup.add(owner, None);
        let b_child = lookup.add(owner, Some(b));

        assert!(HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, Some(a), b_child)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn depth_cap_is_enforced() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let chain = lookup.chain(owner, 4);
        let guard = HierarchyGuard::new(4);

        // Parent three levels below root: new folder sits four hops deep.
        assert!(guard
            .check_parent(&mut lookup, owner, None, chain[3])
            .await
            .is_ok());
        assert_eq!(lookup.calls, 4);

        let deeper = lookup.add(owner, Some(chain[3]));
        let err = guard
            .check_parent(&mut lookup, owner, None, deeper)
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::DepthExceeded(4)));
    }

    #[tokio::test]
    async fn corrupted_cycle_terminates_at_cap() {
        let owner = Uuid::new_v4();
        let mut lookup = MapLookup::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        lookup.folders.insert(a, (owner, Some(b)));
        lookup.folders.insert(b, (owner, Some(a)));

        let err = HierarchyGuard::new(50)
            .check_parent(&mut lookup, owner, None, a)
            .await
            .unwrap_err();
        assert!(matches!(err, HierarchyError::DepthExceeded(50)));
        assert_eq!(lookup.calls, 50);
    }

    #[tokio::test]
    async fn store_errors_pass_through() {
        let err = HierarchyGuard::new(50)
            .check_parent(&mut FailingLookup, Uuid::new_v4(), None, Uuid::new_v4())
            .await
            .unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::Database);
    }

    #[test]
    fn structural_errors_map_to_integrity() {
        let app: AppError = HierarchyError::Circular.into();
        assert_eq!(app.kind, ErrorKind::Integrity);
        let app: AppError = HierarchyError::DepthExceeded(50).into();
        assert_eq!(app.message, "Maximum folder depth of 50 exceeded");
    }
}
