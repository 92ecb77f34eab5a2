//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{AuthService, ClickService, UrlService};
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::infrastructure::memory::{MemoryUrlRepository, MemoryUserRepository};
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use crate::web::session::SessionCodec;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub click_service: Arc<ClickService<dyn UrlRepository>>,
    pub sessions: Arc<SessionCodec>,
    /// Prefix for displayed short links, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Set when the store is PostgreSQL; used by the health check.
    pub db: Option<Arc<PgPool>>,
}

impl AppState {
    /// Wires the services over one pair of repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        urls: Arc<dyn UrlRepository>,
        sessions: SessionCodec,
        base_url: String,
        db: Option<Arc<PgPool>>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(users)),
            url_service: Arc::new(UrlService::new(urls.clone())),
            click_service: Arc::new(ClickService::new(urls)),
            sessions: Arc::new(sessions),
            base_url: base_url.trim_end_matches('/').to_string(),
            db,
        }
    }

    /// State backed by the in-process store.
    pub fn in_memory(sessions: SessionCodec, base_url: String) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryUrlRepository::new()),
            sessions,
            base_url,
            None,
        )
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: Arc<PgPool>, sessions: SessionCodec, base_url: String) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgUrlRepository::new(pool.clone())),
            sessions,
            base_url,
            Some(pool),
        )
    }

    /// Public short link for a record id.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/u/{}", self.base_url, id)
    }
}
