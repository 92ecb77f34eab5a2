//! Account registration, login and session identity.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, SessionData, SessionUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Service for registering users and resolving who a session belongs to.
///
/// Passwords are hashed with argon2id on the blocking pool. Sessions only ever
/// carry `{id, email}`, never the hash.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new user.
    ///
    /// Email uniqueness is a check before insert, so two concurrent
    /// registrations with the same email can both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - Email or password is empty
    /// - Email is already registered
    ///
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim();

        if email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password can't be empty.",
                json!({ "field": if email.is_empty() { "email" } else { "password" } }),
            ));
        }

        if self.repository.find_id_by_email(email).await?.is_some() {
            return Err(AppError::bad_request(
                format!("{email} already in use."),
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = self
            .repository
            .insert(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Checks credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong password.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let rejected = || {
            AppError::unauthorized(
                "User name or password incorrect.",
                json!({ "email": email }),
            )
        };

        let Some(user_id) = self.repository.find_id_by_email(email.trim()).await? else {
            return Err(rejected());
        };

        let Some(user) = self.repository.get(&user_id).await? else {
            return Err(rejected());
        };

        let hash = user.password_hash.clone();
        let candidate = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AppError::internal("Password check failed", json!({ "reason": e.to_string() })))?;

        match matches {
            Ok(true) => Ok(user),
            Ok(false) => Err(rejected()),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(rejected())
            }
        }
    }

    /// Resolves the session's user against the store.
    ///
    /// A session naming a user that no longer exists resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn current_user(&self, session: &SessionData) -> Result<Option<User>, AppError> {
        match session.user_id() {
            Some(id) => self.repository.get(id).await,
            None => Ok(None),
        }
    }

    /// Marks the session as belonging to `user`.
    pub fn establish(&self, session: &mut SessionData, user: &User) {
        session.user = Some(SessionUser::from(user));
    }

    /// Clears the user identity. The visitor tracking id survives.
    pub fn logout(&self, session: &mut SessionData) {
        session.user = None;
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the password is empty.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn change_password(&self, user_id: &str, new_password: &str) -> Result<User, AppError> {
        if new_password.is_empty() {
            return Err(AppError::bad_request(
                "Password can't be empty.",
                json!({ "field": "password" }),
            ));
        }

        let mut user = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        user.password_hash = hash_blocking(new_password.to_string()).await?;

        self.repository.update(&user).await
    }
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?
        .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))
}
