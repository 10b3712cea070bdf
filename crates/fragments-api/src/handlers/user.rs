//! Account self-service handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::UpdateUsernameRequest;
use crate::dto::response::{ApiResponse, SessionResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/v1/users/me
///
/// Returns a new token; the caller's previous one names the old username.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUsernameRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let session = state.user_service.rename(&auth, &req.username).await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// DELETE /api/v1/users/me
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    state.user_service.delete_account(&auth).await?;
    Ok(StatusCode::NO_CONTENT)
}
