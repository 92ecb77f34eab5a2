//! HTTP request handlers for the JSON endpoints.

pub mod health;

pub use health::health_handler;
