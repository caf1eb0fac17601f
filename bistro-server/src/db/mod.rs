//! Database access layer
//!
//! Free functions over `&PgPool`, hand-written SQL. Rows whose columns need
//! translating (enum tags, JSONB) go through private `*Row` structs.

pub mod analytics;
pub mod backup;
pub mod coupons;
pub mod gallery;
pub mod menu_items;
pub mod reviews;
pub mod settings;
pub mod site_content;
pub mod users;
