//! Unified error codes for the Bistro backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Menu errors
//! - 4xxx: Coupon errors
//! - 5xxx: Review errors
//! - 6xxx: Content errors (gallery, site content, uploads)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the dashboard can switch on it
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,
    /// Too many login attempts from one client
    TooManyAttempts = 1008,

    // ==================== 3xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 3001,
    /// Unknown menu category
    MenuCategoryInvalid = 3003,

    // ==================== 4xxx: Coupon ====================
    /// Coupon not found
    CouponNotFound = 4001,
    /// Coupon exists but cannot be applied to this order
    CouponNotValid = 4002,
    /// Coupon code already exists
    CouponCodeExists = 4003,

    // ==================== 5xxx: Review ====================
    /// Review not found
    ReviewNotFound = 5001,
    /// External review source is not configured
    ReviewSourceNotConfigured = 5002,
    /// External review source returned an error
    ReviewSourceFailed = 5003,

    // ==================== 6xxx: Content ====================
    /// Gallery image not found
    GalleryImageNotFound = 6001,
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// No file provided in request
    NoFileProvided = 6504,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized access. Please log in.",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::TooManyAttempts => "Too many login attempts",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuCategoryInvalid => "Unknown menu category",

            // Coupon
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponNotValid => "Coupon not found or not valid",
            ErrorCode::CouponCodeExists => "Coupon code already exists",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewSourceNotConfigured => {
                "Google Places API key and Place ID must be configured in settings"
            }
            ErrorCode::ReviewSourceFailed => "Failed to fetch reviews from Google",

            // Content
            ErrorCode::GalleryImageNotFound => "Gallery image not found",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No image selected",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),
            1008 => Ok(ErrorCode::TooManyAttempts),

            // Menu
            3001 => Ok(ErrorCode::MenuItemNotFound),
            3003 => Ok(ErrorCode::MenuCategoryInvalid),

            // Coupon
            4001 => Ok(ErrorCode::CouponNotFound),
            4002 => Ok(ErrorCode::CouponNotValid),
            4003 => Ok(ErrorCode::CouponCodeExists),

            // Review
            5001 => Ok(ErrorCode::ReviewNotFound),
            5002 => Ok(ErrorCode::ReviewSourceNotConfigured),
            5003 => Ok(ErrorCode::ReviewSourceFailed),

            // Content
            6001 => Ok(ErrorCode::GalleryImageNotFound),
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::NoFileProvided),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
