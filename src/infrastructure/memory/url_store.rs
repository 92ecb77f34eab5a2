//! In-process implementation of the url repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlId, UrlRecord};
use crate::domain::repositories::{MAX_ID_ATTEMPTS, UrlRepository};
use crate::error::AppError;
use crate::utils::id_generator::generate_id;

/// Url record storage held in memory for the lifetime of the process.
///
/// Clicks live inside their record, so deleting a record drops its history.
#[derive(Default)]
pub struct MemoryUrlRepository {
    urls: DashMap<UrlId, UrlRecord>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            if let Entry::Vacant(slot) = self.urls.entry(generate_id()) {
                let now = Utc::now();
                let record = UrlRecord::new(
                    slot.key().clone(),
                    new_record.long_url,
                    new_record.owner_id,
                    now,
                    now,
                    Vec::new(),
                );
                slot.insert(record.clone());
                return Ok(record);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique id",
            json!({ "collection": "urls" }),
        ))
    }

    async fn get(&self, id: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.urls.get(id).map(|r| r.value().clone()))
    }

    async fn update(&self, record: &UrlRecord) -> Result<UrlRecord, AppError> {
        match self.urls.get_mut(&record.id) {
            Some(mut stored) => {
                stored.long_url = record.long_url.clone();
                stored.last_updated = record.last_updated;
                Ok(stored.value().clone())
            }
            None => Err(AppError::not_found(
                "Url not found",
                json!({ "id": record.id }),
            )),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.urls.remove(id).is_some())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<UrlRecord>, AppError> {
        let mut records: Vec<UrlRecord> = self
            .urls
            .iter()
            .filter(|entry| entry.is_owned_by(owner_id))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn append_click(&self, id: &str, click: ClickEvent) -> Result<bool, AppError> {
        match self.urls.get_mut(id) {
            Some(mut record) => {
                record.clicks.push(click);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
