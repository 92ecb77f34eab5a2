//! Repository trait for the `users` collection.

use crate::domain::entities::{NewUser, User, UserId};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUserRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user under a freshly generated id.
    ///
    /// Does not check email uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no free id could be generated or on
    /// storage errors.
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Replaces the stored user (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Returns the id of the first user with this exact email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_id_by_email(&self, email: &str) -> Result<Option<UserId>, AppError>;

    /// Lists every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;
}
