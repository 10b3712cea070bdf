//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A per-user tag. `(user_id, name)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Optional display color (`#rrggbb`).
    pub color: Option<String>,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
}

/// A tag together with the number of snippets it is linked to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TagSummary {
    /// Tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// Optional display color.
    pub color: Option<String>,
    /// Number of linked snippets.
    pub snippet_count: i64,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
}

/// One row of a batch tag lookup: a snippet and one of its tag names.
#[derive(Debug, Clone, FromRow)]
pub struct SnippetTagName {
    /// The snippet.
    pub snippet_id: Uuid,
    /// A linked tag name.
    pub name: String,
}
