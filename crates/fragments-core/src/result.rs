//! Convenience result type alias for Fragments.

use crate::error::AppError;

/// A specialized `Result` type for Fragments operations.
pub type AppResult<T> = Result<T, AppError>;
