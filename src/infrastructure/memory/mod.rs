//! In-memory repository implementations.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data is lost on restart.

mod url_store;
mod user_store;

pub use url_store::MemoryUrlRepository;
pub use user_store::MemoryUserRepository;
