//! Utility functions used across the application.
//!
//! - [`id_generator`] - Random record and tracking ids
//! - [`url_validator`] - Syntactic long URL validation
//! - [`password`] - argon2id hashing

pub mod id_generator;
pub mod password;
pub mod url_validator;
