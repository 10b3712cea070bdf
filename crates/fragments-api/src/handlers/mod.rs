//! Route handlers organized by domain.

pub mod auth;
pub mod folder;
pub mod health;
pub mod snippet;
pub mod tag;
pub mod user;
