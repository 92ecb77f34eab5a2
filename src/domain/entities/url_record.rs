//! Url record entity representing an owned short link.

use chrono::{DateTime, Utc};

use super::click::ClickEvent;
use super::user::UserId;

/// Short id of a url record, used both in `/u/{id}` and `/urls/{id}`.
pub type UrlId = String;

/// A short link owned by exactly one user.
///
/// `owner_id` never changes after creation. `long_url` and `last_updated`
/// change only through owner updates. `clicks` is kept oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: UrlId,
    pub long_url: String,
    pub owner_id: UserId,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub clicks: Vec<ClickEvent>,
}

impl UrlRecord {
    pub fn new(
        id: UrlId,
        long_url: String,
        owner_id: UserId,
        created: DateTime<Utc>,
        last_updated: DateTime<Utc>,
        clicks: Vec<ClickEvent>,
    ) -> Self {
        Self {
            id,
            long_url,
            owner_id,
            created,
            last_updated,
            clicks,
        }
    }

    /// Returns true if `user_id` owns this record.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a url record.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub long_url: String,
    pub owner_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ownership() {
        let now = Utc::now();
        let record = UrlRecord::new(
            "b2xVn2".to_string(),
            "http://www.lighthouselabs.ca/".to_string(),
            "owner1".to_string(),
            now,
            now,
            vec![],
        );

        assert!(record.is_owned_by("owner1"));
        assert!(!record.is_owned_by("someone"));
        assert!(record.clicks.is_empty());
    }
}
