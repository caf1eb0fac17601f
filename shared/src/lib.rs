//! Shared types for the Bistro site backend
//!
//! Error system, response envelope, domain models and the pure validators
//! used by the server (and by anything else that needs to agree with it on
//! what a valid menu item, coupon or review looks like).

pub mod error;
pub mod models;
pub mod util;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
