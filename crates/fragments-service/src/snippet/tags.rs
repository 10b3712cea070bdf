//! Tag name normalization.

use std::collections::HashSet;

use fragments_core::error::AppError;

/// Maximum number of distinct tags on one snippet.
pub const MAX_TAGS: usize = 20;
/// Maximum tag name length.
pub const TAG_NAME_MAX: usize = 50;

/// Trim, validate and de-duplicate a submitted tag list.
///
/// Duplicates are detected case-insensitively and the first spelling
/// wins. The count limit applies to the de-duplicated list.
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, AppError> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for name in raw {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag names cannot be empty"));
        }
        if name.chars().count() > TAG_NAME_MAX {
            return Err(AppError::validation(format!(
                "Tag names must be {TAG_NAME_MAX} characters or less"
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        {
            return Err(AppError::validation(
                "Tag names can only contain letters, numbers, spaces, hyphens, and underscores",
            ));
        }
        if seen.insert(name.to_lowercase()) {
            tags.push(name.to_string());
        }
    }

    if tags.len() > MAX_TAGS {
        return Err(AppError::validation(format!(
            "A snippet can have at most {MAX_TAGS} tags"
        )));
    }

    Ok(tags)
}
