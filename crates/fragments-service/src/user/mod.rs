//! Accounts: registration, login, token checks, and self-service.

pub mod auth;
pub mod service;

pub use auth::{AuthService, AuthSession};
pub use service::UserService;
