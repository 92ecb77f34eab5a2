//! PostgreSQL implementation of url repository.
//!
//! Clicks are stored in `url_clicks` and joined back onto their record on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::domain::repositories::{MAX_ID_ATTEMPTS, UrlRepository};
use crate::error::AppError;
use crate::utils::id_generator::generate_id;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: String,
    long_url: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl UrlRow {
    fn into_record(self, clicks: Vec<ClickEvent>) -> UrlRecord {
        UrlRecord::new(
            self.id,
            self.long_url,
            self.owner_id,
            self.created_at,
            self.last_updated,
            clicks,
        )
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    url_id: String,
    tracking_id: String,
    user_agent: Option<String>,
    referer: Option<String>,
    clicked_at: DateTime<Utc>,
}

impl From<ClickRow> for ClickEvent {
    fn from(r: ClickRow) -> Self {
        ClickEvent {
            tracking_id: r.tracking_id,
            user_agent: r.user_agent,
            referer: r.referer,
            clicked_at: r.clicked_at,
        }
    }
}

/// PostgreSQL repository for url records and their click history.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads clicks for several records in one query, grouped by record id.
    async fn clicks_for(&self, ids: &[String]) -> Result<HashMap<String, Vec<ClickEvent>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT url_id, tracking_id, user_agent, referer, clicked_at
            FROM url_clicks
            WHERE url_id = ANY($1)
            ORDER BY clicked_at, id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut grouped: HashMap<String, Vec<ClickEvent>> = HashMap::new();
        for row in rows {
            grouped.entry(row.url_id.clone()).or_default().push(row.into());
        }

        Ok(grouped)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let row = sqlx::query_as::<_, UrlRow>(
                r#"
                INSERT INTO urls (id, long_url, owner_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                RETURNING id, long_url, owner_id, created_at, last_updated
                "#,
            )
            .bind(generate_id())
            .bind(&new_record.long_url)
            .bind(&new_record.owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

            if let Some(row) = row {
                return Ok(row.into_record(Vec::new()));
            }
        }

        Err(AppError::internal(
            "Failed to generate unique id",
            json!({ "collection": "urls" }),
        ))
    }

    async fn get(&self, id: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, owner_id, created_at, last_updated
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut clicks = self.clicks_for(std::slice::from_ref(&row.id)).await?;
        let clicks = clicks.remove(&row.id).unwrap_or_default();

        Ok(Some(row.into_record(clicks)))
    }

    async fn update(&self, record: &UrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls SET long_url = $2, last_updated = $3
            WHERE id = $1
            RETURNING id, long_url, owner_id, created_at, last_updated
            "#,
        )
        .bind(&record.id)
        .bind(&record.long_url)
        .bind(record.last_updated)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let row =
            row.ok_or_else(|| AppError::not_found("Url not found", json!({ "id": record.id })))?;

        let mut clicks = self.clicks_for(std::slice::from_ref(&row.id)).await?;
        let clicks = clicks.remove(&row.id).unwrap_or_default();

        Ok(row.into_record(clicks))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, owner_id, created_at, last_updated
            FROM urls
            WHERE owner_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut clicks = self.clicks_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let record_clicks = clicks.remove(&row.id).unwrap_or_default();
                row.into_record(record_clicks)
            })
            .collect())
    }

    async fn append_click(&self, id: &str, click: ClickEvent) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_clicks (url_id, tracking_id, user_agent, referer, clicked_at)
            SELECT id, $2, $3, $4, $5 FROM urls WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&click.tracking_id)
        .bind(&click.user_agent)
        .bind(&click.referer)
        .bind(click.clicked_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
