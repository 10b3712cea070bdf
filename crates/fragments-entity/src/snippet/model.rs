//! Snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored code snippet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Containing folder (null means unfiled).
    pub folder_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Source text.
    pub content: String,
    /// Lowercase language tag, e.g. `rust` or `c++`.
    pub language: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the owner marked the snippet as a favorite.
    pub is_favorite: bool,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last updated.
    pub updated_at: DateTime<Utc>,
    /// Names of the linked tags, sorted by name.
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validated scalar fields written on snippet create and update.
#[derive(Debug, Clone)]
pub struct SnippetFields {
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Source text.
    pub content: String,
    /// Language tag.
    pub language: String,
    /// Optional description.
    pub description: Option<String>,
    /// Favorite flag.
    pub is_favorite: bool,
}
