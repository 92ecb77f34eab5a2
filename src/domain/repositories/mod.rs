//! Repository trait definitions for the domain layer.
//!
//! These traits are the record store contract. Implementations live in
//! `crate::infrastructure`, and `mockall` generates mocks for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - The `users` collection
//! - [`UrlRepository`] - The `urls` collection, including click history
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod url_repository;
pub mod user_repository;

pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// How many fresh ids an insert tries before giving up on collisions.
pub const MAX_ID_ATTEMPTS: usize = 10;
