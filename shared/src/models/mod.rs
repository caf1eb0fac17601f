//! Data models
//!
//! Entities, request payloads and their validators.
//! Simple DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All timestamps are Unix millis.

pub mod analytics;
pub mod backup;
pub mod coupon;
pub mod gallery;
pub mod menu_item;
pub mod review;
pub mod serde_helpers;
pub mod site_content;
pub mod user;

// Re-exports
pub use analytics::*;
pub use backup::*;
pub use coupon::*;
pub use gallery::*;
pub use menu_item::*;
pub use review::*;
pub use site_content::*;
pub use user::*;
