//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use fragments_core::types::PageResponse;
use fragments_entity::folder::Folder;

use crate::dto::request::{FolderListQuery, FolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, Paging, parse_optional_uuid, parse_uuid};
use crate::state::AppState;

/// GET /api/v1/folders?parent_id=&page=&limit=
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Paging(page): Paging,
    Query(query): Query<FolderListQuery>,
) -> ApiResult<Json<PageResponse<Folder>>> {
    let parent_id = parse_optional_uuid(query.parent_id.as_deref(), "parent_id")?;

    let folders = state
        .folder_service
        .list_folders(&auth, parent_id, page)
        .await?;

    Ok(Json(folders))
}

/// GET /api/v1/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = parse_uuid(&id, "folder id")?;
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<FolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let folder = state
        .folder_service
        .create_folder(&auth, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/v1/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<FolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = parse_uuid(&id, "folder id")?;
    let folder = state
        .folder_service
        .update_folder(&auth, id, req.into())
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/v1/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id, "folder id")?;
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
