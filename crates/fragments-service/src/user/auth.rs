//! Registration, login, and bearer-token authentication.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use fragments_auth::jwt::{IssuedToken, JwtDecoder, JwtEncoder};
use fragments_auth::password::{PasswordHasher, PasswordValidator};
use fragments_core::error::AppError;
use fragments_core::result::AppResult;
use fragments_database::repositories::UserRepository;
use fragments_entity::user::{CreateUser, User};

use crate::validation;

/// Generic message for every failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// A signed token together with the user it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// Bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// The authenticated user.
    pub user: User,
}

impl AuthSession {
    fn new(issued: IssuedToken, user: User) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        }
    }
}

/// Handles credential verification and token issuance.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    failure_delay: Duration,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        failure_delay: Duration,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
            failure_delay,
        }
    }

    /// Creates an account and signs the user in.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<AuthSession> {
        let username = validation::username(username)?;
        validation::required(password, "Password is required")?;
        self.validator.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                password_hash,
            })
            .await?;

        let issued = self.encoder.issue(user.id, &user.username)?;
        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthSession::new(issued, user))
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown usernames and wrong passwords fail with the same error after
    /// the same hashing work and the same delay.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthSession> {
        let username = username.trim();
        validation::required(username, "Username is required")?;
        validation::required(password, "Password is required")?;

        let user = self.user_repo.find_by_username(username).await?;
        let user = self.check_credentials(username, user, password).await?;

        let issued = self.encoder.issue(user.id, &user.username)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthSession::new(issued, user))
    }

    /// Verify `password` against `user`, or against the dummy hash when the
    /// username matched nobody. Both failures sleep for `failure_delay`.
    async fn check_credentials(
        &self,
        username: &str,
        user: Option<User>,
        password: &str,
    ) -> AppResult<User> {
        let verified = match &user {
            Some(user) => self.hasher.verify_password(password, &user.password_hash)?,
            None => {
                self.hasher.verify_dummy(password);
                false
            }
        };

        match user.filter(|_| verified) {
            Some(user) => Ok(user),
            None => {
                warn!(username = %username, "Failed login attempt");
                tokio::time::sleep(self.failure_delay).await;
                Err(AppError::authentication(INVALID_CREDENTIALS))
            }
        }
    }

    /// Resolves a bearer token to its current user.
    ///
    /// The token must decode, the user must still exist, and the username
    /// embedded in the token must match the stored one.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.decoder.decode(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        if user.username != claims.username {
            return Err(AppError::authentication("Token is no longer valid"));
        }

        Ok(user)
    }

    /// Issues a fresh token for an already authenticated user.
    pub fn reissue(&self, user: User) -> AppResult<AuthSession> {
        let issued = self.encoder.issue(user.id, &user.username)?;
        Ok(AuthSession::new(issued, user))
    }
}
