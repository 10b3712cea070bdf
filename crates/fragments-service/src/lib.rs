//! # fragments-service
//!
//! Business logic service layer for Fragments. Each service owns the
//! validation and integrity rules of one area and composes repository
//! calls, wrapping multi-statement writes in a single transaction.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod folder;
pub mod snippet;
pub mod tag;
pub mod user;
pub mod validation;

pub use context::RequestContext;
pub use folder::{FolderInput, FolderService, HierarchyError, HierarchyGuard};
pub use snippet::{SnippetInput, SnippetService};
pub use tag::TagService;
pub use user::{AuthService, AuthSession, UserService};

use sqlx::{Postgres, Transaction};

use fragments_core::error::{AppError, ErrorKind};
use fragments_core::result::AppResult;

/// Commit a unit of work. Dropping a transaction without calling this
/// rolls it back.
pub(crate) async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}
