use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage row. The payload stays serialized text at this layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub seq: i64,
    pub form_type: String,
    pub submitted_at: DateTime<Utc>,
    pub data_json: String,
}

/// A submission as handed to callers, with `data` re-parsed into JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: Uuid,
    pub form_type: String,
    pub submitted_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Confirmation returned by create. Does not echo the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    #[serde(skip)]
    pub form_type: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub data: Vec<SubmissionView>,
}

/// Search either falls back to the default first page or returns every match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Page(PagedResult),
    Matches(Vec<SubmissionView>),
}

/// Everything the store needs to insert a row; the sequence is assigned by the backend.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: Uuid,
    pub form_type: String,
    pub submitted_at: DateTime<Utc>,
    pub data_json: String,
}
