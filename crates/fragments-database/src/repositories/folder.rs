//! Folder repository implementation.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use fragments_core::error::{AppError, ErrorKind};
use fragments_core::result::AppResult;
use fragments_core::types::pagination::{PageRequest, PageResponse};
use fragments_entity::folder::{Folder, FolderChanges, NewFolder};

use super::map_write_error;

/// Message returned when a sibling already uses the requested name.
pub const DUPLICATE_FOLDER_NAME: &str = "Folder name already exists in this location";

const FOLDER_COLUMNS: &str = "id, user_id, name, description, parent_id, created_at, updated_at";

/// Repository for folder queries and the statements of folder transactions.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Start a transaction on the folder pool.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Load a folder and lock its row until the transaction ends.
    pub async fn lock(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))
    }

    /// One hop of a parent-chain walk.
    ///
    /// Returns `None` when the folder does not exist for this user,
    /// `Some(None)` for a root folder, `Some(Some(parent))` otherwise.
    pub async fn parent_of(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<Option<Uuid>>> {
        sqlx::query_scalar::<_, Option<Uuid>>(
            "SELECT parent_id FROM folders WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up parent folder", e)
        })
    }

    /// Whether `id` exists and belongs to `user_id`.
    pub async fn is_owned_by(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM folders WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check folder ownership", e)
        })
    }

    /// Whether a sibling under `parent_id` already uses `name`.
    ///
    /// `exclude` skips the folder being renamed.
    pub async fn name_taken(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM folders
                WHERE user_id = $1
                  AND name = $2
                  AND parent_id IS NOT DISTINCT FROM $3
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(parent_id)
        .bind(exclude)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check folder name", e)
        })
    }

    /// Insert a folder.
    pub async fn insert(&self, conn: &mut PgConnection, data: &NewFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO folders (user_id, name, description, parent_id) \
             VALUES ($1, $2, $3, $4) RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(data.user_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .fetch_one(conn)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_FOLDER_NAME, "Failed to create folder"))
    }

    /// Replace name, description and parent of a folder.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        changes: &FolderChanges,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET name = $2, description = $3, parent_id = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.parent_id)
        .fetch_one(conn)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_FOLDER_NAME, "Failed to update folder"))
    }

    /// Count the direct subfolders of a folder.
    pub async fn count_children(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM folders WHERE parent_id = $1")
            .bind(id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count subfolders", e)
            })
    }

    /// Move every snippet in a folder back to root. Returns how many moved.
    pub async fn unfile_snippets(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE snippets SET folder_id = NULL, updated_at = NOW() WHERE folder_id = $1",
        )
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to unfile folder snippets", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete a folder row.
    pub async fn delete(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List the direct children of `parent_id` (root when `None`), by name.
    pub async fn list_children(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folders WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2",
        )
        .bind(user_id)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))?;

        let folders = sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders \
             WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(parent_id)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))?;

        Ok(PageResponse::new(folders, page, total as u64))
    }
}
