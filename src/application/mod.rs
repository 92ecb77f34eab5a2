//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and ownership rules, and
//! give the HTTP handlers and the admin CLI one API to call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, session identity
//! - [`services::url_service::UrlService`] - Owner-only short link management
//! - [`services::click_service::ClickService`] - Visit recording for redirects

pub mod services;
