//! Shared test helpers for integration tests.
//!
//! Tests run against a real PostgreSQL database named by
//! `FRAGMENTS_TEST_DATABASE_URL`. When the variable is unset every test
//! returns early so the suite stays green on machines without a database,
//! unless `CI` is set, in which case a missing database is a failure.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use fragments_api::{AppState, build_app};
use fragments_core::config::AppConfig;
use fragments_database::DatabasePool;
use fragments_database::migration::run_migrations;

/// Password that satisfies the default policy.
pub const PASSWORD: &str = "Correct-Horse-42";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// Status plus decoded JSON body (`Value::Null` for empty bodies).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// `data` member of a success body.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `message` member of an error body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application, or `None` without a test database.
    pub async fn try_new() -> Option<Self> {
        let Ok(url) = std::env::var("FRAGMENTS_TEST_DATABASE_URL") else {
            assert!(
                std::env::var_os("CI").is_none(),
                "FRAGMENTS_TEST_DATABASE_URL must be set when CI is set"
            );
            eprintln!("skipping: FRAGMENTS_TEST_DATABASE_URL is not set");
            return None;
        };

        let mut config = AppConfig::default();
        config.database.url = url;
        config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
        config.auth.login_failure_delay_ms = 0;
        config.auth.rate_limit_requests = 10_000;
        config.folders.max_depth = 5;
        config.validate().expect("test config is valid");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database.url)
            .await
            .expect("Failed to connect to test database");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config.clone(), DatabasePool::from_pool(pool));
        let router = build_app(state);

        Some(Self { router, config })
    }

    /// Send a request and decode the response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register a fresh user and return `(username, token)`.
    pub async fn register_user(&self) -> (String, String) {
        let username = unique_username();
        let response = self
            .request(
                "POST",
                "/api/v1/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let token = response.data()["token"].as_str().unwrap().to_string();
        (username, token)
    }

    /// Create a folder and return its id.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
                Some(token),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Create a snippet from a JSON body and return the created object.
    pub async fn create_snippet(&self, token: &str, body: Value) -> Value {
        let response = self
            .request("POST", "/api/v1/snippets", Some(body), Some(token))
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data().clone()
    }
}

/// Username unique across test runs, within the 3..=50 character policy.
pub fn unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}
