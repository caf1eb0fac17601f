//! Input validation helpers
//!
//! Text length limits and a field-error accumulator shared by the menu,
//! coupon, review and content validators. Validators collect every problem
//! they find into [`ValidationErrors`] so one response can report them all.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu items, coupon codes, usernames, customers
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and review comments
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: coupon codes, size labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated field errors for one payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any recorded failure concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Check that a required string is non-blank and within the length limit.
    pub fn require_text(&mut self, value: &str, field: &str, label: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
        } else if value.chars().count() > max_len {
            self.add(
                field,
                format!("{label} is too long (max {max_len} characters)"),
            );
        }
    }

    /// Check that an optional string, if present, is within the length limit.
    pub fn optional_text(&mut self, value: Option<&str>, field: &str, label: &str, max_len: usize) {
        if let Some(v) = value
            && v.chars().count() > max_len
        {
            self.add(
                field,
                format!("{label} is too long (max {max_len} characters)"),
            );
        }
    }

    /// `Ok(())` when nothing was recorded, the accumulated errors otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errs: ValidationErrors) -> Self {
        let message = errs
            .errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string());
        let list = serde_json::to_value(&errs.errors).unwrap_or_default();
        AppError::with_message(ErrorCode::ValidationFailed, message).with_detail("errors", list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        let mut errs = ValidationErrors::new();
        errs.require_text("Margherita", "name", "Name", MAX_NAME_LEN);
        assert!(errs.is_empty());

        errs.require_text("   ", "name", "Name", MAX_NAME_LEN);
        errs.require_text(&"x".repeat(11), "code", "Code", 10);
        assert_eq!(errs.errors().len(), 2);
        assert_eq!(errs.errors()[0].message, "Name is required");
        assert_eq!(errs.errors()[1].message, "Code is too long (max 10 characters)");
        assert!(errs.has_field("code"));
    }

    #[test]
    fn test_optional_text() {
        let mut errs = ValidationErrors::new();
        errs.optional_text(None, "imageUrl", "Image URL", 5);
        errs.optional_text(Some("abc"), "imageUrl", "Image URL", 5);
        assert!(errs.into_result().is_ok());
    }

    #[test]
    fn test_into_app_error() {
        let mut errs = ValidationErrors::new();
        errs.add("rating", "Rating must be between 1 and 5");
        errs.add("comment", "Comment is required");

        let err: AppError = errs.into_result().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Rating must be between 1 and 5");
        let details = err.details.unwrap();
        let list = details.get("errors").unwrap().as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1]["field"], "comment");
    }
}
