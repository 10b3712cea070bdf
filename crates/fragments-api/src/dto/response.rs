//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fragments_entity::user::User;
use fragments_service::AuthSession;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps `data`.
    pub fn ok(data: T) -> Self {
        Self { data }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token plus the user it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `GET /` banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    /// Service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Always `"running"`.
    pub status: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"unhealthy"`.
    pub status: String,
    /// `"connected"` or `"disconnected"`.
    pub database: String,
}

/// `GET /api/v1` description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    /// Service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Route groups by name.
    pub endpoints: Vec<EndpointGroup>,
}

/// One route group in [`ApiInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointGroup {
    /// Group name.
    pub name: String,
    /// Base path.
    pub path: String,
    /// Whether a bearer token is required.
    pub auth_required: bool,
}
