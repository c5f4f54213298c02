//! Middleware Module
//!
//! Request processing shared by handlers.
//!
//! - **`auth`** - bearer-token extractor for authenticated routes

pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser};
