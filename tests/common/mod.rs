#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use formvault::config::{Config, DEFAULT_CORS_ORIGINS};
use formvault::db::{MemoryRepo, StoreError, SubmissionRepo};
use formvault::models::{NewSubmission, SubmissionRecord};
use formvault::submission::Submissions;

/// A running test server backed by its own in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub submissions: Submissions,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON payload for a form type, return (body, status).
    pub async fn submit(&self, form_type: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/submissions/{form_type}")))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST an arbitrary body with an explicit content type.
    pub async fn submit_raw(
        &self,
        form_type: &str,
        content_type: &str,
        body: &'static str,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/submissions/{form_type}")))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 16 * 1024,
        cors_origins: DEFAULT_CORS_ORIGINS.split(',').map(str::to_string).collect(),
        static_dir: None,
        seed_demo: false,
        log_level: "warn".to_string(),
    }
}

pub fn memory_store() -> Submissions {
    Submissions::new(Arc::new(MemoryRepo::new()))
}

/// Repo whose writes fail at the database and whose reads return one row with
/// unparsable payload text.
pub struct BrokenRepo {
    pub row_id: Uuid,
}

impl BrokenRepo {
    pub const PAYLOAD: &'static str = "{\"name\": broken";

    pub fn new() -> Self {
        Self {
            row_id: Uuid::now_v7(),
        }
    }

    fn row(&self) -> SubmissionRecord {
        SubmissionRecord {
            id: self.row_id,
            seq: 1,
            form_type: "contact".to_string(),
            submitted_at: Utc::now(),
            data_json: Self::PAYLOAD.to_string(),
        }
    }
}

#[async_trait]
impl SubmissionRepo for BrokenRepo {
    fn backend(&self) -> &'static str {
        "broken"
    }

    async fn insert(&self, _new: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(1)
    }

    async fn list_newest(&self, _offset: i64, _limit: i64) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(vec![self.row()])
    }

    async fn find_containing(&self, _needle: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(vec![self.row()])
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<SubmissionRecord>, StoreError> {
        Ok(Some(self.row()))
    }
}

/// Spawn a test app with a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(memory_store(), test_config()).await
}

pub async fn spawn_app_with(submissions: Submissions, config: Config) -> TestApp {
    let app = formvault::build_app(submissions.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        submissions,
    }
}
