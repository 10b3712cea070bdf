//! Repository implementations for all Fragments entities.

pub mod folder;
pub mod snippet;
pub mod tag;
pub mod user;

pub use folder::FolderRepository;
pub use snippet::SnippetRepository;
pub use tag::TagRepository;
pub use user::UserRepository;

use fragments_core::error::{AppError, ErrorKind};

/// Whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Map a failed write: unique violations become `Conflict` with
/// `conflict_message`, everything else a database error.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    conflict_message: &str,
    context: &str,
) -> AppError {
    if is_unique_violation(&err) {
        AppError::with_source(ErrorKind::Conflict, conflict_message, err)
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}
