//! Tag repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use fragments_core::error::{AppError, ErrorKind};
use fragments_core::result::AppResult;
use fragments_entity::tag::TagSummary;

/// Repository for per-user tags and snippet links.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the ID of the `(user_id, name)` tag, creating it if absent.
    ///
    /// A concurrent insert of the same name loses on the unique key and
    /// falls through to the second lookup.
    pub async fn find_or_create(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        name: &str,
    ) -> AppResult<Uuid> {
        if let Some(id) = self.find_id(&mut *conn, user_id, name).await? {
            return Ok(id);
        }

        let inserted = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) \
             ON CONFLICT (user_id, name) DO NOTHING RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tag", e))?;

        match inserted {
            Some(id) => Ok(id),
            None => self
                .find_id(conn, user_id, name)
                .await?
                .ok_or_else(|| AppError::database(format!("Tag '{name}' vanished during insert"))),
        }
    }

    async fn find_id(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        name: &str,
    ) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM tags WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    /// Link a snippet to a tag. Linking twice is a no-op.
    pub async fn link(
        &self,
        conn: &mut PgConnection,
        snippet_id: Uuid,
        tag_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO snippet_tags (snippet_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(snippet_id)
        .bind(tag_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link tag", e))?;
        Ok(())
    }

    /// Remove every tag link of a snippet.
    pub async fn unlink_all(&self, conn: &mut PgConnection, snippet_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM snippet_tags WHERE snippet_id = $1")
            .bind(snippet_id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlink tags", e))?;
        Ok(result.rows_affected())
    }

    /// A user's tags ordered by name, with linked snippet counts.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TagSummary>> {
        sqlx::query_as::<_, TagSummary>(
            r#"
            SELECT t.id, t.name, t.color, t.created_at, COUNT(st.snippet_id) AS snippet_count
            FROM tags t
            LEFT JOIN snippet_tags st ON st.tag_id = t.id
            WHERE t.user_id = $1
            GROUP BY t.id
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }
}
