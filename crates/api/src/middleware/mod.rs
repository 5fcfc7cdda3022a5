//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Requires valid HTTP Basic credentials.

pub mod auth;
