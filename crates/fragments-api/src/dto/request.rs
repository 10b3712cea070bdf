//! Request DTOs with validation.
//!
//! The `validator` rules here only catch missing fields; the services own
//! the real input rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fragments_service::{FolderInput, SnippetInput};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[serde(default)]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Rename request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUsernameRequest {
    /// New username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Create or replace a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderRequest {
    /// Folder name.
    #[serde(default)]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Parent folder; absent or null for a root folder.
    pub parent_id: Option<Uuid>,
}

impl From<FolderRequest> for FolderInput {
    fn from(req: FolderRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            parent_id: req.parent_id,
        }
    }
}

/// Create or replace a snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetRequest {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Source text.
    #[serde(default)]
    pub content: String,
    /// Language.
    #[serde(default)]
    pub language: String,
    /// Description.
    pub description: Option<String>,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Favorite flag.
    #[serde(default)]
    pub is_favorite: bool,
    /// Tag names. Absent leaves tags unchanged on update.
    pub tags: Option<Vec<String>>,
}

impl From<SnippetRequest> for SnippetInput {
    fn from(req: SnippetRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            language: req.language,
            description: req.description,
            folder_id: req.folder_id,
            is_favorite: req.is_favorite,
            tags: req.tags,
        }
    }
}

/// `GET /folders` filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderListQuery {
    /// Parent whose children to list; root folders when absent.
    pub parent_id: Option<String>,
}

/// `GET /snippets` filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetListQuery {
    /// Full-text query.
    pub search: Option<String>,
}
