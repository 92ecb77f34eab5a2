//! Web-specific middleware (session auth, error pages).

pub mod error_page;
pub mod web_auth;
