//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters. The schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgUrlRepository`] - Url records and click history

pub mod pg_url_repository;
pub mod pg_user_repository;

pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
