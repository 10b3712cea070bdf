//! Tag listing handler.

use axum::Json;
use axum::extract::State;

use fragments_entity::tag::TagSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<TagSummary>>>> {
    let tags = state.tag_service.list_tags(&auth).await?;
    Ok(Json(ApiResponse::ok(tags)))
}
