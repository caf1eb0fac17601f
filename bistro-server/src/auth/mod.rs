//! Admin authentication and login throttling

pub mod rate_limit;
pub mod session;

pub use session::AdminIdentity;
