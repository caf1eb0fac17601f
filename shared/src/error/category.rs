//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 3xxx: Menu errors
/// - 4xxx: Coupon errors
/// - 5xxx: Review errors
/// - 6xxx: Content errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Menu errors (3xxx)
    Menu,
    /// Coupon errors (4xxx)
    Coupon,
    /// Review errors (5xxx)
    Review,
    /// Content errors (6xxx)
    Content,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            3000..4000 => Self::Menu,
            4000..5000 => Self::Coupon,
            5000..6000 => Self::Review,
            6000..7000 => Self::Content,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Menu => "menu",
            Self::Coupon => "coupon",
            Self::Review => "review",
            Self::Content => "content",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Menu);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Coupon);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Review);
        assert_eq!(ErrorCategory::from_code(6501), ErrorCategory::Content);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TooManyAttempts.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::MenuItemNotFound.category(), ErrorCategory::Menu);
        assert_eq!(ErrorCode::CouponNotValid.category(), ErrorCategory::Coupon);
        assert_eq!(ErrorCode::ReviewNotFound.category(), ErrorCategory::Review);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Coupon).unwrap();
        assert_eq!(json, "\"coupon\"");
        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
