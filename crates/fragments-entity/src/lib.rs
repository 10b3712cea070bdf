//! # fragments-entity
//!
//! Domain entity models for Fragments. Every struct in this crate
//! represents a database table row or the data needed to write one.
//! Row types derive `sqlx::FromRow`.

pub mod folder;
pub mod snippet;
pub mod tag;
pub mod user;
