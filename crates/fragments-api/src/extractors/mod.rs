//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod pagination;
pub mod path;

pub use auth::AuthUser;
pub use json::{JsonBody, ValidatedJson};
pub use pagination::{PaginationParams, Paging};
pub use path::{parse_optional_uuid, parse_uuid};
