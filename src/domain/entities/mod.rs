//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs use separate `New*`
//! structs since ids and timestamps are assigned by the store.
//!
//! - [`User`] - A registered account
//! - [`UrlRecord`] - An owned short link with its click history
//! - [`ClickEvent`] - One recorded visit to a short link
//! - [`SessionData`] - What a browser session carries between requests

pub mod click;
pub mod session;
pub mod url_record;
pub mod user;

pub use click::{ClickEvent, Visit};
pub use session::{SessionData, SessionUser};
pub use url_record::{NewUrlRecord, UrlId, UrlRecord};
pub use user::{NewUser, User, UserId};
