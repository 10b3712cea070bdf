//! # fragments-database
//!
//! PostgreSQL connection management, embedded migrations, and concrete
//! repositories for users, folders, snippets and tags.
//!
//! Multi-statement writes are composed by the service layer: it opens a
//! transaction with `begin()` and passes the connection to the repository
//! methods that take `&mut PgConnection`.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
