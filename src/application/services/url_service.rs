//! Short link management for record owners.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::analytics::{Summary, summarize};
use crate::domain::authorization::can_access;
use crate::domain::entities::{NewUrlRecord, UrlRecord, User};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::url_validator::{ValidatedUrl, validate};

/// A record with its click totals, as listed on the owner's index page.
#[derive(Debug, Clone)]
pub struct UrlOverview {
    pub record: UrlRecord,
    pub summary: Summary,
}

/// Service for creating, reading, editing and deleting url records.
///
/// Every operation on a single record goes through [`can_access`], except
/// [`UrlService::resolve`], which backs the public redirect.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new url service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates `long_url` and stores a record owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute http(s) URL.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(&self, owner: &User, long_url: &str) -> Result<UrlRecord, AppError> {
        let validated = check_url(long_url)?;

        let record = self
            .repository
            .insert(NewUrlRecord {
                long_url: validated.into_string(),
                owner_id: owner.id.clone(),
            })
            .await?;

        tracing::info!(url_id = %record.id, owner_id = %owner.id, "Short link created");

        Ok(record)
    }

    /// Lists the owner's records, oldest first, with their summaries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_for_owner(&self, owner: &User) -> Result<Vec<UrlOverview>, AppError> {
        let records = self.repository.list_by_owner(&owner.id).await?;

        Ok(records
            .into_iter()
            .map(|record| UrlOverview {
                summary: summarize(&record.clicks),
                record,
            })
            .collect())
    }

    /// Fetches a record the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    /// Returns [`AppError::Forbidden`] if the caller is not the owner.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_authorized(&self, id: &str, user: Option<&User>) -> Result<UrlRecord, AppError> {
        let record = self.resolve(id).await?;

        if !can_access(&record, user) {
            return Err(AppError::forbidden(
                "You don't have permission to access that URL.",
                json!({ "id": id, "user_id": user.map(|u| u.id.as_str()) }),
            ));
        }

        Ok(record)
    }

    /// Points an owned record at a new long URL.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_authorized`], plus [`AppError::Validation`] for an
    /// invalid URL.
    pub async fn update(&self, id: &str, user: &User, long_url: &str) -> Result<UrlRecord, AppError> {
        let mut record = self.get_authorized(id, Some(user)).await?;
        let validated = check_url(long_url)?;

        record.long_url = validated.into_string();
        record.last_updated = Utc::now();

        self.repository.update(&record).await
    }

    /// Deletes an owned record.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_authorized`].
    pub async fn delete(&self, id: &str, user: &User) -> Result<(), AppError> {
        let record = self.get_authorized(id, Some(user)).await?;

        if self.repository.delete(&record.id).await? {
            tracing::info!(url_id = %record.id, "Short link deleted");
        }

        Ok(())
    }

    /// Looks up a record by short id, with no ownership check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, id: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }
}

fn check_url(long_url: &str) -> Result<ValidatedUrl, AppError> {
    validate(long_url).map_err(|e| {
        AppError::bad_request(
            format!("{long_url} is not a valid URL"),
            json!({ "reason": e.to_string() }),
        )
    })
}
