//! Server-rendered web layer.
//!
//! HTML pages for registration, login and link management, plus the public
//! redirect. Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`dto`] - Form and query payloads
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Session auth and error page rendering
//! - [`routes`] - Route configuration
//! - [`session`] - Signed session cookie

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
