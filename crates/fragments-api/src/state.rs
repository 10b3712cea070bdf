//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use fragments_auth::jwt::{JwtDecoder, JwtEncoder};
use fragments_auth::password::{PasswordHasher, PasswordValidator};
use fragments_core::config::AppConfig;
use fragments_database::DatabasePool;
use fragments_database::repositories::{
    FolderRepository, SnippetRepository, TagRepository, UserRepository,
};
use fragments_service::{
    AuthService, FolderService, HierarchyGuard, SnippetService, TagService, UserService,
};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Per-IP limiter for the unauthenticated auth endpoints
    pub auth_rate_limiter: RateLimiter,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and token checks
    pub auth_service: Arc<AuthService>,
    /// Account self-service
    pub user_service: Arc<UserService>,
    /// Folder hierarchy
    pub folder_service: Arc<FolderService>,
    /// Snippets and their tags
    pub snippet_service: Arc<SnippetService>,
    /// Tag listing
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wires repositories, auth primitives and services on top of `db`.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let pool = db.pool().clone();

        // Repositories
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let snippet_repo = Arc::new(SnippetRepository::new(pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(pool));

        // Auth
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        // Services
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&hasher),
            Arc::clone(&validator),
            encoder,
            decoder,
            Duration::from_millis(config.auth.login_failure_delay_ms),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            hasher,
            validator,
            Arc::clone(&auth_service),
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            HierarchyGuard::new(config.folders.max_depth),
        ));
        let snippet_service = Arc::new(SnippetService::new(
            snippet_repo,
            folder_repo,
            Arc::clone(&tag_repo),
        ));
        let tag_service = Arc::new(TagService::new(tag_repo));

        let auth_rate_limiter = RateLimiter::new(
            config.auth.rate_limit_requests as usize,
            Duration::from_secs(config.auth.rate_limit_window_seconds),
        );

        Self {
            config: Arc::new(config),
            db,
            auth_rate_limiter,
            auth_service,
            user_service,
            folder_service,
            snippet_service,
            tag_service,
        }
    }
}
