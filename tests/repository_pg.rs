//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, which needs
//! `DATABASE_URL`. Run with `cargo test -- --ignored`.

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tinylinks::domain::entities::{ClickEvent, NewUrlRecord, NewUser};
use tinylinks::domain::repositories::{UrlRepository, UserRepository};
use tinylinks::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
    }
}

fn click(tracking_id: &str) -> ClickEvent {
    ClickEvent {
        tracking_id: tracking_id.to_string(),
        user_agent: Some("test-agent".to_string()),
        referer: Some("https://ref.example".to_string()),
        clicked_at: Utc::now(),
    }
}

async fn create_owner(pool: &Arc<PgPool>, email: &str) -> String {
    PgUserRepository::new(pool.clone())
        .insert(new_user(email))
        .await
        .unwrap()
        .id
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_roundtrip(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.insert(new_user("a@test.com")).await.unwrap();

    let found = repo.get(&user.id).await.unwrap().unwrap();
    assert_eq!(found.email, "a@test.com");
    assert_eq!(
        repo.find_id_by_email("a@test.com").await.unwrap(),
        Some(user.id.clone())
    );
    assert_eq!(repo.find_id_by_email("b@test.com").await.unwrap(), None);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_update(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let mut user = repo.insert(new_user("a@test.com")).await.unwrap();

    user.password_hash = "$argon2id$changed".to_string();
    repo.update(&user).await.unwrap();

    let stored = repo.get(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$argon2id$changed");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_lifecycle(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "a@test.com").await;
    let repo = PgUrlRepository::new(pool);

    let mut record = repo
        .insert(NewUrlRecord {
            long_url: "http://example.com".to_string(),
            owner_id: owner.clone(),
        })
        .await
        .unwrap();
    assert!(record.clicks.is_empty());

    record.long_url = "https://example.org".to_string();
    record.last_updated = Utc::now();
    let updated = repo.update(&record).await.unwrap();
    assert_eq!(updated.long_url, "https://example.org");
    assert_eq!(updated.owner_id, owner);

    let listed = repo.list_by_owner(&owner).await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(repo.delete(&record.id).await.unwrap());
    assert_eq!(repo.get(&record.id).await.unwrap(), None);
    assert!(!repo.delete(&record.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_clicks_are_loaded_with_record(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "a@test.com").await;
    let repo = PgUrlRepository::new(pool);
    let record = repo
        .insert(NewUrlRecord {
            long_url: "http://example.com".to_string(),
            owner_id: owner.clone(),
        })
        .await
        .unwrap();

    assert!(repo.append_click(&record.id, click("t1")).await.unwrap());
    assert!(repo.append_click(&record.id, click("t2")).await.unwrap());
    assert!(repo.append_click(&record.id, click("t1")).await.unwrap());

    let stored = repo.get(&record.id).await.unwrap().unwrap();
    let order: Vec<_> = stored.clicks.iter().map(|c| c.tracking_id.as_str()).collect();
    assert_eq!(order, vec!["t1", "t2", "t1"]);
    assert_eq!(stored.clicks[0].referer.as_deref(), Some("https://ref.example"));

    let listed = repo.list_by_owner(&owner).await.unwrap();
    assert_eq!(listed[0].clicks.len(), 3);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_append_click_to_missing_record(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(!repo.append_click("gone00", click("t1")).await.unwrap());
}
