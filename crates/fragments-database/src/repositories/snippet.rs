//! Snippet repository implementation.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use fragments_core::error::{AppError, ErrorKind};
use fragments_core::result::AppResult;
use fragments_core::types::pagination::{PageRequest, PageResponse};
use fragments_entity::snippet::{Snippet, SnippetFields};
use fragments_entity::tag::SnippetTagName;

const SNIPPET_COLUMNS: &str = "id, user_id, folder_id, title, content, language, description, \
                               is_favorite, created_at, updated_at";

const TAG_NAMES_SQL: &str = "SELECT t.name FROM tags t \
                             JOIN snippet_tags st ON st.tag_id = t.id \
                             WHERE st.snippet_id = $1 ORDER BY t.name ASC";

/// Repository for snippet CRUD, listing and full-text search.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: PgPool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Start a transaction on the snippet pool.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Find a snippet by ID, tags included.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        let snippet = sqlx::query_as::<_, Snippet>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))?;

        match snippet {
            Some(mut snippet) => {
                snippet.tags = self.tag_names(id).await?;
                Ok(Some(snippet))
            }
            None => Ok(None),
        }
    }

    /// Load a snippet and lock its row until the transaction ends.
    pub async fn lock(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock snippet", e))
    }

    /// Insert a snippet for `user_id`.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        fields: &SnippetFields,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(&format!(
            "INSERT INTO snippets \
             (user_id, folder_id, title, content, language, description, is_favorite) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {SNIPPET_COLUMNS}"
        ))
        .bind(user_id)
        .bind(fields.folder_id)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.language)
        .bind(&fields.description)
        .bind(fields.is_favorite)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Replace the scalar fields of a snippet.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        fields: &SnippetFields,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(&format!(
            "UPDATE snippets SET folder_id = $2, title = $3, content = $4, language = $5, \
             description = $6, is_favorite = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING {SNIPPET_COLUMNS}"
        ))
        .bind(id)
        .bind(fields.folder_id)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.language)
        .bind(&fields.description)
        .bind(fields.is_favorite)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update snippet", e))
    }

    /// Delete a snippet owned by `user_id`. Tag links cascade.
    pub async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete snippet", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's snippets, newest first.
    pub async fn list(&self, user_id: Uuid, page: PageRequest) -> AppResult<PageResponse<Snippet>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snippets WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count snippets", e)
            })?;

        let mut snippets = sqlx::query_as::<_, Snippet>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snippets", e))?;

        self.attach_tags(&mut snippets).await?;
        Ok(PageResponse::new(snippets, page, total as u64))
    }

    /// Full-text search over title, description and content, best match
    /// first and newest first among equal ranks.
    pub async fn search(
        &self,
        user_id: Uuid,
        query: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM snippets \
             WHERE user_id = $1 AND search_document @@ plainto_tsquery('english', $2)",
        )
        .bind(user_id)
        .bind(query)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count search results", e))?;

        let mut snippets = sqlx::query_as::<_, Snippet>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets \
             WHERE user_id = $1 AND search_document @@ plainto_tsquery('english', $2) \
             ORDER BY ts_rank(search_document, plainto_tsquery('english', $2)) DESC, \
                      created_at DESC \
             LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(query)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search snippets", e))?;

        self.attach_tags(&mut snippets).await?;
        Ok(PageResponse::new(snippets, page, total as u64))
    }

    /// Tag names linked to one snippet, sorted by name.
    pub async fn tag_names(&self, snippet_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(TAG_NAMES_SQL)
            .bind(snippet_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load snippet tags", e)
            })
    }

    /// [`Self::tag_names`] inside an open transaction.
    pub async fn tag_names_in(
        &self,
        conn: &mut PgConnection,
        snippet_id: Uuid,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(TAG_NAMES_SQL)
            .bind(snippet_id)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load snippet tags", e)
            })
    }

    /// Fill `tags` for a page of snippets with one query.
    async fn attach_tags(&self, snippets: &mut [Snippet]) -> AppResult<()> {
        if snippets.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = snippets.iter().map(|s| s.id).collect();
        let rows = sqlx::query_as::<_, SnippetTagName>(
            "SELECT st.snippet_id, t.name FROM snippet_tags st \
             JOIN tags t ON t.id = st.tag_id \
             WHERE st.snippet_id = ANY($1) ORDER BY t.name ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load snippet tags", e))?;

        let mut by_snippet: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            by_snippet.entry(row.snippet_id).or_default().push(row.name);
        }
        for snippet in snippets.iter_mut() {
            snippet.tags = by_snippet.remove(&snippet.id).unwrap_or_default();
        }
        Ok(())
    }
}
