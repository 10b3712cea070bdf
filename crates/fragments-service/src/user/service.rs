//! Account self-service: profile, rename, password change, deletion.

use std::sync::Arc;

use tracing::info;

use fragments_auth::password::{PasswordHasher, PasswordValidator};
use fragments_core::error::AppError;
use fragments_core::result::AppResult;
use fragments_database::repositories::UserRepository;
use fragments_entity::user::User;

use super::auth::{AuthService, AuthSession};
use crate::context::RequestContext;
use crate::validation;

/// Handles operations a signed-in user performs on their own account.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuance after a rename.
    auth: Arc<AuthService>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            auth,
        }
    }

    /// Gets the current user's record.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the caller's username.
    ///
    /// Existing tokens carry the old username and stop validating, so a
    /// fresh session is returned.
    pub async fn rename(&self, ctx: &RequestContext, username: &str) -> AppResult<AuthSession> {
        let username = validation::username(username)?;

        let user = self
            .user_repo
            .update_username(ctx.user_id, &username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            user_id = %ctx.user_id,
            old_username = %ctx.username,
            new_username = %user.username,
            "Username changed"
        );

        self.auth.reissue(user)
    }

    /// Changes the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        validation::required(current_password, "Current password is required")?;
        validation::required(new_password, "New password is required")?;
        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let user = self.me(ctx).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        if !self.user_repo.update_password(ctx.user_id, &new_hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, "Password changed");

        Ok(())
    }

    /// Deletes the caller's account and everything it owns.
    pub async fn delete_account(&self, ctx: &RequestContext) -> AppResult<()> {
        if !self.user_repo.delete(ctx.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, username = %ctx.username, "Account deleted");
        Ok(())
    }
}
