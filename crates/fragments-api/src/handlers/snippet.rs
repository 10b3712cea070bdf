//! Snippet CRUD and search handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use fragments_core::types::PageResponse;
use fragments_entity::snippet::Snippet;

use crate::dto::request::{SnippetListQuery, SnippetRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, Paging, parse_uuid};
use crate::state::AppState;

/// GET /api/v1/snippets?search=&page=&limit=
pub async fn list_snippets(
    State(state): State<AppState>,
    auth: AuthUser,
    Paging(page): Paging,
    Query(query): Query<SnippetListQuery>,
) -> ApiResult<Json<PageResponse<Snippet>>> {
    let snippets = state
        .snippet_service
        .list_snippets(&auth, query.search.as_deref(), page)
        .await?;

    Ok(Json(snippets))
}

/// GET /api/v1/snippets/{id}
pub async fn get_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let id = parse_uuid(&id, "snippet id")?;
    let snippet = state.snippet_service.get_snippet(&auth, id).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// POST /api/v1/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<SnippetRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Snippet>>)> {
    let snippet = state
        .snippet_service
        .create_snippet(&auth, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(snippet))))
}

/// PUT /api/v1/snippets/{id}
pub async fn update_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<SnippetRequest>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let id = parse_uuid(&id, "snippet id")?;
    let snippet = state
        .snippet_service
        .update_snippet(&auth, id, req.into())
        .await?;

    Ok(Json(ApiResponse::ok(snippet)))
}

/// DELETE /api/v1/snippets/{id}
pub async fn delete_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id, "snippet id")?;
    state.snippet_service.delete_snippet(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
