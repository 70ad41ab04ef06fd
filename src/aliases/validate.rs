//! Syntax rules for alias names, session paths, and titles.
//!
//! Pure functions with no I/O.

use serde_json::Value;

/// Longest alias name accepted, in characters.
pub const MAX_ALIAS_LENGTH: usize = 128;

/// Names that collide with command words. Compared case-insensitively.
pub const RESERVED_NAMES: &[&str] = &["list", "help", "remove", "delete", "create", "set"];

/// A rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Alias name missing or blank.
    #[error("Alias name cannot be empty")]
    EmptyName,

    /// Alias name contains characters outside `[A-Za-z0-9_-]`.
    #[error("Alias name must contain only letters, numbers, dashes, and underscores")]
    InvalidChars,

    /// Alias name longer than [`MAX_ALIAS_LENGTH`].
    #[error("Alias name cannot exceed 128 characters")]
    TooLong,

    /// Alias name is a reserved command word.
    #[error("'{0}' is a reserved alias name")]
    Reserved(String),

    /// Session path missing or blank.
    #[error("Session path cannot be empty")]
    EmptyPath,

    /// Title given as something other than a string or null.
    #[error("Title must be a string or null")]
    NotString,
}

/// Character class allowed in alias names.
pub fn is_alias_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// True if the name is non-empty and made only of alias characters.
///
/// This is the lenient check used for lookups: it skips the length and
/// reserved-word rules.
pub fn has_alias_syntax(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_alias_char)
}

/// True if `name` is a reserved word, ignoring case.
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_NAMES.contains(&lower.as_str())
}

/// Checks an alias name for creation or rename.
pub fn validate_alias_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !name.chars().all(is_alias_char) {
        return Err(ValidationError::InvalidChars);
    }
    if name.chars().count() > MAX_ALIAS_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if is_reserved(name) {
        return Err(ValidationError::Reserved(name.to_string()));
    }
    Ok(())
}

/// Checks a session path. Only blankness is rejected.
pub fn validate_session_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    Ok(())
}

/// Normalizes an untyped title: null and `""` become `None`, strings pass
/// through, anything else is rejected.
pub fn normalize_title_value(value: &Value) -> Result<Option<String>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ValidationError::NotString),
    }
}

/// Normalizes a typed title. `None` and `""` become `None`.
pub fn normalize_title(title: Option<&str>) -> Option<String> {
    title.filter(|t| !t.is_empty()).map(str::to_string)
}
