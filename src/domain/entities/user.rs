//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// Opaque user identifier produced by [`crate::utils::id_generator`].
pub type UserId = String;

/// A registered account.
///
/// Only the password hash is ever stored. The email is unique among users,
/// but that is checked by [`crate::application::services::AuthService`]
/// before insert, not by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }
}

/// Input data for registering a new user.
///
/// The id and creation time are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(
            "u1abcd".to_string(),
            "u1@test.com".to_string(),
            "$argon2id$hash".to_string(),
            now,
        );

        assert_eq!(user.id, "u1abcd");
        assert_eq!(user.email, "u1@test.com");
        assert_eq!(user.created_at, now);
    }
}
