//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on the web or storage layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Record store trait definitions
//! - [`authorization`] - Owner-only access decision
//! - [`analytics`] - Click summaries and per-visitor grouping
//!
//! # Click Processing Flow
//!
//! 1. `GET /u/{id}` resolves the record
//! 2. [`crate::application::services::ClickService::track`] skips owner visits,
//!    resolves or mints the visitor's tracking id and appends a
//!    [`entities::ClickEvent`]
//! 3. Management pages derive [`analytics::Summary`] from the stored clicks

pub mod analytics;
pub mod authorization;
pub mod entities;
pub mod repositories;
