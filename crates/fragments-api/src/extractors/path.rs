//! Typed path and query id helpers.

use uuid::Uuid;

use fragments_core::error::AppError;

/// Parses a UUID from a path segment or query value.
pub fn parse_uuid(s: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s.trim()).map_err(|_| AppError::validation(format!("Invalid {what}")))
}

/// Parses an optional id where an empty value means "none".
pub fn parse_optional_uuid(s: Option<&str>, what: &str) -> Result<Option<Uuid>, AppError> {
    match s.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_uuid(value, what).map(Some),
        None => Ok(None),
    }
}
