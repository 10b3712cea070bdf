//! Snippet CRUD, search, and tag-set reconciliation.

use std::sync::Arc;

use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

use fragments_core::error::AppError;
use fragments_core::result::AppResult;
use fragments_core::types::{PageRequest, PageResponse};
use fragments_database::repositories::{FolderRepository, SnippetRepository, TagRepository};
use fragments_entity::snippet::{Snippet, SnippetFields};

use super::tags::normalize_tags;
use crate::context::RequestContext;
use crate::validation;

/// Raw snippet fields as submitted by the client.
///
/// On update every scalar field is replaced. `tags: None` leaves the
/// current tag links alone; `Some` (even empty) replaces them.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SnippetInput {
    /// Title.
    pub title: String,
    /// Source text.
    pub content: String,
    /// Language tag.
    pub language: String,
    /// Optional description.
    pub description: Option<String>,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Favorite flag.
    #[serde(default)]
    pub is_favorite: bool,
    /// Tag names.
    pub tags: Option<Vec<String>>,
}

/// Manages snippets and keeps their tag links consistent.
#[derive(Debug, Clone)]
pub struct SnippetService {
    snippet_repo: Arc<SnippetRepository>,
    folder_repo: Arc<FolderRepository>,
    tag_repo: Arc<TagRepository>,
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(
        snippet_repo: Arc<SnippetRepository>,
        folder_repo: Arc<FolderRepository>,
        tag_repo: Arc<TagRepository>,
    ) -> Self {
        Self {
            snippet_repo,
            folder_repo,
            tag_repo,
        }
    }

    /// Gets a snippet owned by the caller, tags included.
    pub async fn get_snippet(&self, ctx: &RequestContext, snippet_id: Uuid) -> AppResult<Snippet> {
        self.snippet_repo
            .find_by_id(snippet_id)
            .await?
            .filter(|s| ctx.owns(s.user_id))
            .ok_or_else(|| AppError::not_found("Snippet not found"))
    }

    /// Lists the caller's snippets, newest first, or searches them when a
    /// non-blank query is given.
    pub async fn list_snippets(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        match search.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.snippet_repo.search(ctx.user_id, query, page).await,
            None => self.snippet_repo.list(ctx.user_id, page).await,
        }
    }

    /// Creates a snippet and links its tags.
    pub async fn create_snippet(
        &self,
        ctx: &RequestContext,
        input: SnippetInput,
    ) -> AppResult<Snippet> {
        let mut fields = scalar_fields(&input)?;

        let mut tx = self.snippet_repo.begin().await?;

        self.check_folder(&mut *tx, ctx, input.folder_id).await?;
        fields.folder_id = input.folder_id;
        let tags = normalize_tags(input.tags.as_deref().unwrap_or_default())?;

        let mut snippet = self.snippet_repo.insert(&mut *tx, ctx.user_id, &fields).await?;
        self.link_tags(&mut *tx, ctx.user_id, snippet.id, &tags).await?;
        snippet.tags = self.snippet_repo.tag_names_in(&mut *tx, snippet.id).await?;

        crate::commit(tx).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet.id,
            tags = snippet.tags.len(),
            "Snippet created"
        );

        Ok(snippet)
    }

    /// Replaces a snippet's fields and, when given, its tag set.
    pub async fn update_snippet(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        input: SnippetInput,
    ) -> AppResult<Snippet> {
        let mut fields = scalar_fields(&input)?;

        let mut tx = self.snippet_repo.begin().await?;

        self.snippet_repo
            .lock(&mut *tx, snippet_id)
            .await?
            .filter(|s| ctx.owns(s.user_id))
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        self.check_folder(&mut *tx, ctx, input.folder_id).await?;
        fields.folder_id = input.folder_id;
        let tags = input.tags.as_deref().map(normalize_tags).transpose()?;

        let mut snippet = self.snippet_repo.update(&mut *tx, snippet_id, &fields).await?;
        if let Some(tags) = &tags {
            self.tag_repo.unlink_all(&mut *tx, snippet_id).await?;
            self.link_tags(&mut *tx, ctx.user_id, snippet_id, tags).await?;
        }
        snippet.tags = self.snippet_repo.tag_names_in(&mut *tx, snippet_id).await?;

        crate::commit(tx).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            tags_replaced = tags.is_some(),
            "Snippet updated"
        );

        Ok(snippet)
    }

    /// Deletes a snippet owned by the caller.
    pub async fn delete_snippet(&self, ctx: &RequestContext, snippet_id: Uuid) -> AppResult<()> {
        if !self.snippet_repo.delete_owned(ctx.user_id, snippet_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }

        info!(user_id = %ctx.user_id, snippet_id = %snippet_id, "Snippet deleted");
        Ok(())
    }

    /// A referenced folder must exist and belong to the caller.
    async fn check_folder(
        &self,
        conn: &mut PgConnection,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(folder_id) = folder_id {
            if !self
                .folder_repo
                .is_owned_by(conn, ctx.user_id, folder_id)
                .await?
            {
                return Err(AppError::validation("Folder does not exist"));
            }
        }
        Ok(())
    }

    async fn link_tags(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        snippet_id: Uuid,
        names: &[String],
    ) -> AppResult<()> {
        for name in names {
            let tag_id = self.tag_repo.find_or_create(&mut *conn, user_id, name).await?;
            self.tag_repo.link(&mut *conn, snippet_id, tag_id).await?;
        }
        Ok(())
    }
}

/// Validates title, content, language and description, in that order.
fn scalar_fields(input: &SnippetInput) -> AppResult<SnippetFields> {
    Ok(SnippetFields {
        title: validation::title(&input.title)?,
        content: validation::content(&input.content)?,
        language: validation::language(&input.language)?,
        description: validation::description(input.description.as_deref())?,
        folder_id: None,
        is_favorite: input.is_favorite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SnippetInput {
        SnippetInput {
            title: " Quicksort ".to_string(),
            content: "fn sort() {}".to_string(),
            language: "Rust".to_string(),
            description: Some("   ".to_string()),
            ..SnippetInput::default()
        }
    }

    #[test]
    fn scalar_fields_are_normalized() {
        let fields = scalar_fields(&valid_input()).unwrap();
        assert_eq!(fields.title, "Quicksort");
        assert_eq!(fields.language, "rust");
        assert_eq!(fields.description, None);
        assert!(!fields.is_favorite);
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let input = SnippetInput {
            title: String::new(),
            language: "c#".to_string(),
            ..valid_input()
        };
        assert_eq!(scalar_fields(&input).unwrap_err().message, "Title is required");

        let input = SnippetInput {
            content: " ".to_string(),
            language: "c#".to_string(),
            ..valid_input()
        };
        assert_eq!(scalar_fields(&input).unwrap_err().message, "Content is required");

        let input = SnippetInput {
            description: Some("d".repeat(501)),
            language: "c#".to_string(),
            ..valid_input()
        };
        assert!(scalar_fields(&input)
            .unwrap_err()
            .message
            .starts_with("Language"));
    }

    #[test]
    fn missing_tags_deserialize_as_none() {
        let input: SnippetInput = serde_json::from_str(
            r#"{"title":"t","content":"c","language":"go"}"#,
        )
        .unwrap();
        assert!(input.tags.is_none());

        let input: SnippetInput = serde_json::from_str(
            r#"{"title":"t","content":"c","language":"go","tags":[]}"#,
        )
        .unwrap();
        assert_eq!(input.tags, Some(Vec::new()));
    }
}
