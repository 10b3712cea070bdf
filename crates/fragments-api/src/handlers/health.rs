//! Banner, health and API info handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::{ApiInfo, EndpointGroup, HealthResponse, HomeResponse};
use crate::state::AppState;

const SERVICE_NAME: &str = "Fragments API";

/// GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

/// GET /health
///
/// 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.health_check().await {
        Ok(true) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
            }),
        ),
        result => {
            if let Err(e) = result {
                warn!(error = %e, "Database health check failed");
            }
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "disconnected".to_string(),
                }),
            )
        }
    }
}

/// GET /api/v1
pub async fn api_info() -> Json<ApiInfo> {
    let group = |name: &str, path: &str, auth_required: bool| EndpointGroup {
        name: name.to_string(),
        path: path.to_string(),
        auth_required,
    };

    Json(ApiInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            group("auth", "/api/v1/auth", false),
            group("users", "/api/v1/users", true),
            group("folders", "/api/v1/folders", true),
            group("snippets", "/api/v1/snippets", true),
            group("tags", "/api/v1/tags", true),
        ],
    })
}
