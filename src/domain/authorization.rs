//! Ownership check for management routes.

use crate::domain::entities::{UrlRecord, User};

/// Decides whether `user` may read, update or delete `record`.
///
/// True only when a user is present and owns the record. The public redirect
/// route does not consult this.
pub fn can_access(record: &UrlRecord, user: Option<&User>) -> bool {
    user.is_some_and(|u| record.is_owned_by(&u.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str) -> User {
        User::new(
            id.to_string(),
            format!("{id}@test.com"),
            "hash".to_string(),
            Utc::now(),
        )
    }

    fn record_owned_by(owner: &str) -> UrlRecord {
        UrlRecord::new(
            "abc123".to_string(),
            "http://example.com/".to_string(),
            owner.to_string(),
            Utc::now(),
            Utc::now(),
            vec![],
        )
    }

    #[test]
    fn test_owner_can_access() {
        let owner = user("owner");
        assert!(can_access(&record_owned_by("owner"), Some(&owner)));
    }

    #[test]
    fn test_other_user_cannot_access() {
        let record = record_owned_by("owner");
        for id in ["other", "Owner", "owner ", ""] {
            assert!(!can_access(&record, Some(&user(id))), "id {id:?}");
        }
    }

    #[test]
    fn test_anonymous_cannot_access() {
        assert!(!can_access(&record_owned_by("owner"), None));
    }
}
