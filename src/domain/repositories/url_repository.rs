//! Repository trait for the `urls` collection.

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for owned short links and their clicks.
///
/// Records are returned with their full click history, oldest click first.
/// There are no transactions: concurrent updates are last-write-wins and
/// concurrent click appends are independent inserts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_memory.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new record under a freshly generated short id.
    ///
    /// `created` and `last_updated` are both set to the current time and the
    /// click list starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no free id could be generated or on
    /// storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Looks a record up by short id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, id: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Persists `long_url` and `last_updated` of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, record: &UrlRecord) -> Result<UrlRecord, AppError>;

    /// Removes a record together with its clicks.
    ///
    /// Returns `Ok(false)` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Lists the records owned by a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<UrlRecord>, AppError>;

    /// Appends a click to a record.
    ///
    /// Returns `Ok(false)` if the record was deleted in the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append_click(&self, id: &str, click: ClickEvent) -> Result<bool, AppError>;
}
