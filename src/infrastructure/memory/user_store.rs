//! In-process implementation of the user repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{NewUser, User, UserId};
use crate::domain::repositories::{MAX_ID_ATTEMPTS, UserRepository};
use crate::error::AppError;
use crate::utils::id_generator::generate_id;

/// User storage held in memory for the lifetime of the process.
///
/// Owned by the application state; nothing is global.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<UserId, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            if let Entry::Vacant(slot) = self.users.entry(generate_id()) {
                let user = User::new(
                    slot.key().clone(),
                    new_user.email,
                    new_user.password_hash,
                    Utc::now(),
                );
                slot.insert(user.clone());
                return Ok(user);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique id",
            json!({ "collection": "users" }),
        ))
    }

    async fn get(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        match self.users.get_mut(&user.id) {
            Some(mut stored) => {
                *stored = user.clone();
                Ok(user.clone())
            }
            None => Err(AppError::not_found(
                "User not found",
                json!({ "id": user.id }),
            )),
        }
    }

    async fn find_id_by_email(&self, email: &str) -> Result<Option<UserId>, AppError> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.email == email)
            .min_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|entry| entry.key().clone()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }
}
