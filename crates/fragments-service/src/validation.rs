//! Input rules shared by the services.
//!
//! Every function trims its input, checks it, and returns the value to
//! store. Lengths are counted in characters.

use fragments_core::error::AppError;

/// Maximum folder name length.
pub const FOLDER_NAME_MAX: usize = 100;
/// Maximum description length (folders and snippets).
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum snippet title length.
pub const TITLE_MAX: usize = 200;
/// Maximum snippet content length.
pub const CONTENT_MAX: usize = 1_000_000;
/// Maximum language tag length.
pub const LANGUAGE_MAX: usize = 50;
/// Username length bounds.
pub const USERNAME_MIN: usize = 3;
/// Username length bounds.
pub const USERNAME_MAX: usize = 50;

/// Validate and normalize a username.
pub fn username(raw: &str) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    let len = value.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::validation(
            "Username can only contain letters, numbers, hyphens, and underscores",
        ));
    }
    Ok(value.to_string())
}

/// Validate and normalize a folder name.
pub fn folder_name(raw: &str) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation("Folder name is required"));
    }
    if value.chars().count() > FOLDER_NAME_MAX {
        return Err(AppError::validation(format!(
            "Folder name must be {FOLDER_NAME_MAX} characters or less"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-' | '.'))
    {
        return Err(AppError::validation(
            "Folder name can only contain letters, numbers, spaces, hyphens, underscores, and dots",
        ));
    }
    Ok(value.to_string())
}

/// Validate an optional description. Blank input becomes `None`.
pub fn description(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::validation(format!(
            "Description must be {DESCRIPTION_MAX} characters or less"
        )));
    }
    Ok(Some(value.to_string()))
}

/// Validate and normalize a snippet title.
pub fn title(raw: &str) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if value.chars().count() > TITLE_MAX {
        return Err(AppError::validation(format!(
            "Title must be {TITLE_MAX} characters or less"
        )));
    }
    Ok(value.to_string())
}

/// Validate snippet content. The text is stored as given; only the
/// required check looks at the trimmed value.
pub fn content(raw: &str) -> Result<String, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::validation("Content is required"));
    }
    if raw.chars().count() > CONTENT_MAX {
        return Err(AppError::validation(format!(
            "Content must be {CONTENT_MAX} characters or less"
        )));
    }
    Ok(raw.to_string())
}

/// Validate and normalize a language tag (lowercased).
pub fn language(raw: &str) -> Result<String, AppError> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return Err(AppError::validation("Language is required"));
    }
    if value.chars().count() > LANGUAGE_MAX {
        return Err(AppError::validation(format!(
            "Language must be {LANGUAGE_MAX} characters or less"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '+')
    {
        return Err(AppError::validation(
            "Language can only contain lowercase letters, numbers, hyphens, and plus signs",
        ));
    }
    Ok(value)
}

/// Require a non-empty secret field without trimming it.
pub fn required(value: &str, message: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert_eq!(username("  alice_01 ").unwrap(), "alice_01");
        assert!(username("al").is_err());
        assert!(username(&"a".repeat(51)).is_err());
        assert!(username("alice smith").is_err());
        assert!(username("   ").is_err());
    }

    #[test]
    fn folder_name_is_trimmed_and_checked() {
        assert_eq!(folder_name("  My Folder.v2 ").unwrap(), "My Folder.v2");
        assert!(folder_name("").is_err());
        assert!(folder_name("a/b").is_err());
        assert!(folder_name(&"x".repeat(101)).is_err());
        assert!(folder_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn blank_description_is_none() {
        assert_eq!(description(None).unwrap(), None);
        assert_eq!(description(Some("   ")).unwrap(), None);
        assert_eq!(description(Some(" notes ")).unwrap(), Some("notes".to_string()));
        assert!(description(Some(&"d".repeat(501))).is_err());
    }

    #[test]
    fn title_limits() {
        assert!(title(" ").is_err());
        assert!(title(&"t".repeat(201)).is_err());
        assert_eq!(title(" Hello ").unwrap(), "Hello");
    }

    #[test]
    fn content_keeps_indentation() {
        let code = "    fn main() {}\n";
        assert_eq!(content(code).unwrap(), code);
        assert!(content(" \n\t").is_err());
    }

    #[test]
    fn language_is_lowercased_and_restricted() {
        assert_eq!(language(" C++ ").unwrap(), "c++");
        assert_eq!(language("objective-c").unwrap(), "objective-c");
        assert!(language("c#").is_err());
        assert!(language("").is_err());
        assert!(language(&"a".repeat(51)).is_err());
    }

    #[test]
    fn limits_count_characters() {
        // 200 bytes, 100 characters: passes the length rule
        let wide = "é".repeat(100);
        let err = folder_name(&wide).unwrap_err();
        assert!(err.message.contains("can only contain"));

        let title_200 = "é".repeat(200);
        assert!(title(&title_200).is_ok());
    }
}
