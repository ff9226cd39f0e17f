//! Store behaviour against PostgreSQL. Skipped unless `DATABASE_URL` is set.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use formvault::db::{PgRepo, SubmissionRepo};
use formvault::models::SearchResult;
use formvault::submission::{SubmissionError, Submissions};

struct TestDb {
    admin_url: String,
    db_name: String,
    repo: PgRepo,
}

/// Create a throwaway database and run migrations on it.
async fn test_db() -> Option<TestDb> {
    let _ = dotenvy::dotenv();
    let Ok(base_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping postgres test");
        return None;
    };

    let db_name = format!("formvault_test_{}", Uuid::now_v7().simple());
    let (base, _) = base_url.rsplit_once('/').expect("DATABASE_URL has no database path");
    let admin_url = format!("{base}/postgres");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");
    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");
    admin_pool.close().await;

    let repo = PgRepo::connect(&format!("{base}/{db_name}"), 5)
        .await
        .expect("Failed to connect to test database");

    Some(TestDb {
        admin_url,
        db_name,
        repo,
    })
}

async fn cleanup(db: TestDb) {
    db.repo.pool().close().await;

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&db.admin_url)
        .await
        .expect("Failed to connect for cleanup");
    let _ = sqlx::query(&format!(
        "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
        db.db_name
    ))
    .execute(&admin_pool)
    .await;
    admin_pool.close().await;
}

#[tokio::test]
async fn pg_round_trip_and_pagination() {
    let Some(db) = test_db().await else { return };
    let store = Submissions::new(Arc::new(db.repo.clone()));
    assert_eq!(store.backend(), "postgres");

    let data = json!({ "name": "John Smith", "selected": "A", "checked": true });
    let receipt = store.create("contact", &data).await.unwrap();
    let view = store.get_by_id(receipt.id).await.unwrap();
    assert_eq!(view.data, data);
    assert_eq!(view.submitted_at, receipt.submitted_at);

    let base = Utc::now();
    for i in 0..7i64 {
        store
            .create_at("contact", &json!({ "index": i }), base + Duration::minutes(i))
            .await
            .unwrap();
    }

    let first = store.list_page(1, 5).await.unwrap();
    assert_eq!(first.total_count, 8);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.data[0].data["index"], 6);

    let second = store.list_page(2, 5).await.unwrap();
    assert_eq!(second.data.len(), 3);
    assert_eq!(second.data[2].id, receipt.id);

    cleanup(db).await;
}

#[tokio::test]
async fn pg_search_is_literal() {
    let Some(db) = test_db().await else { return };
    let store = Submissions::new(Arc::new(db.repo.clone()));

    store
        .create("contact", &json!({ "discount": "50%_off" }))
        .await
        .unwrap();
    store
        .create("contact", &json!({ "discount": "5000ff" }))
        .await
        .unwrap();
    store
        .create("contact", &json!({ "name": "A sample" }))
        .await
        .unwrap();

    let SearchResult::Matches(found) = store.search("%_").await.unwrap() else {
        panic!("expected matches");
    };
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data["discount"], "50%_off");

    let SearchResult::Matches(found) = store.search("a sample").await.unwrap() else {
        panic!("expected matches");
    };
    assert!(found.is_empty());

    cleanup(db).await;
}

#[tokio::test]
async fn pg_malformed_row_is_storage_error() {
    let Some(db) = test_db().await else { return };
    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO form_submissions (id, form_type, submitted_at, data_json)
         VALUES ($1, 'contact', now(), '{broken')",
    )
    .bind(id)
    .execute(db.repo.pool())
    .await
    .unwrap();

    assert_eq!(db.repo.count().await.unwrap(), 1);
    let store = Submissions::new(Arc::new(db.repo.clone()));
    assert!(matches!(
        store.get_by_id(id).await,
        Err(SubmissionError::Storage(_))
    ));

    cleanup(db).await;
}
