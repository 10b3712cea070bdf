//! Route definitions for the Fragments HTTP API.
//!
//! Resource routes are mounted under `/api/v1`; the banner and health
//! check live at the root. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use fragments_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.body_limit_bytes;
    let timeout = server.request_timeout();
    let cors = middleware::cors::build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .route("/", get(handlers::health::api_info))
        .merge(public_auth_routes(&state))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(snippet_routes())
        .merge(tag_routes());

    Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Register and login, behind the per-IP limiter.
fn public_auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::auth_rate_limit,
        ))
}

/// Authenticated auth endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
}

/// Account self-service
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/me",
        get(handlers::user::get_me)
            .put(handlers::user::update_me)
            .delete(handlers::user::delete_me),
    )
}

/// Folder CRUD
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
}

/// Snippet CRUD and search
fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets",
            get(handlers::snippet::list_snippets).post(handlers::snippet::create_snippet),
        )
        .route(
            "/snippets/{id}",
            get(handlers::snippet::get_snippet)
                .put(handlers::snippet::update_snippet)
                .delete(handlers::snippet::delete_snippet),
        )
}

/// Tag listing
fn tag_routes() -> Router<AppState> {
    Router::new().route("/tags", get(handlers::tag::list_tags))
}

async fn route_not_found() -> ApiError {
    ApiError(AppError::not_found("Route not found"))
}
