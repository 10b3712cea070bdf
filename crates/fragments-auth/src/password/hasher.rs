//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
};

use fragments_core::error::{AppError, ErrorKind};

/// PHC string verified against when a login names an unknown user.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Argon2id with the crate's default cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Creates a hasher with default Argon2id parameters.
    ///
    /// The dummy hash is computed here so an unknown-user login never pays
    /// for hashing on top of verification.
    pub fn new() -> Self {
        let hasher = Self {
            argon2: Argon2::default(),
        };
        hasher.dummy_hash();
        hasher
    }

    /// Hash `password` with a fresh random salt into a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password hashing failed", e))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Stored password hash is malformed", e)
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Internal,
                "Password verification failed",
                e,
            )),
        }
    }

    /// Spend one verification's worth of work without a real hash.
    pub fn verify_dummy(&self, password: &str) {
        if let Some(hash) = self.dummy_hash() {
            let _ = self.verify_password(password, hash);
        }
    }

    fn dummy_hash(&self) -> Option<&'static str> {
        DUMMY_HASH
            .get_or_init(|| self.hash_password("fragments-dummy-password").ok())
            .as_deref()
    }
}
