//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Minimum accepted length of the JWT signing secret.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Value of the `iss` claim.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
    /// Allowed clock skew when validating `exp`/`iat`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Delay applied to every failed login, in milliseconds.
    #[serde(default = "default_login_failure_delay")]
    pub login_failure_delay_ms: u64,
    /// Requests allowed per client IP on the register/login endpoints
    /// within one window.
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: u32,
    /// Length of the rate limit window in seconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: default_issuer(),
            token_ttl_hours: default_token_ttl(),
            leeway_seconds: default_leeway(),
            password_min_length: default_password_min(),
            login_failure_delay_ms: default_login_failure_delay(),
            rate_limit_requests: default_rate_limit_requests(),
            rate_limit_window_seconds: default_rate_limit_window(),
        }
    }
}

fn default_issuer() -> String {
    "fragments-api".to_string()
}

fn default_token_ttl() -> i64 {
    24
}

fn default_leeway() -> u64 {
    300
}

fn default_password_min() -> usize {
    12
}

fn default_login_failure_delay() -> u64 {
    100
}

fn default_rate_limit_requests() -> u32 {
    5
}

fn default_rate_limit_window() -> u64 {
    60
}
