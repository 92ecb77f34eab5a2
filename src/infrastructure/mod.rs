//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - In-process repositories (no database configured, tests)
//! - [`persistence`] - PostgreSQL repositories

pub mod memory;
pub mod persistence;
