//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Containing folder; `None` at the top level.
    pub parent_id: Option<Uuid>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated data for inserting a folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// The owning user.
    pub user_id: Uuid,
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
}

/// Validated replacement values for an existing folder.
#[derive(Debug, Clone)]
pub struct FolderChanges {
    /// New name.
    pub name: String,
    /// New description.
    pub description: Option<String>,
    /// New parent (None moves the folder to root).
    pub parent_id: Option<Uuid>,
}
