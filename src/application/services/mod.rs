//! Business logic services for the application layer.

pub mod auth_service;
pub mod click_service;
pub mod url_service;

pub use auth_service::AuthService;
pub use click_service::{ClickService, TrackOutcome};
pub use url_service::{UrlOverview, UrlService};
