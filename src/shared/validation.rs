//! Validation Utilities
//!
//! Presence checks for request body fields. The API validates presence and
//! basic shape only; anything deeper is left to the accessors.

use super::error::AppError;

/// Require an identifier-like field (`userId`, `ownerId`, ...) to be present
/// and non-empty. Identifiers are stored verbatim, no trimming.
pub fn require_str(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

/// Require a user-facing text field (`name`, `content`, ...) to be present and
/// non-blank. Returns the trimmed value.
pub fn require_text(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}
