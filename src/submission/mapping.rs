//! Boundary between stored payload text and structured JSON.
//!
//! The repo layer only ever sees `data_json` strings. Encoding happens once on
//! create, decoding happens on every read before a record leaves the store.

use serde_json::Value;

use crate::db::StoreError;
use crate::models::{SubmissionRecord, SubmissionView};

/// Compact serde_json text. Object keys keep their submitted order and numbers
/// keep their submitted digits, so big integers and long decimals survive.
pub fn encode_payload(data: &Value) -> String {
    data.to_string()
}

pub fn to_view(record: SubmissionRecord) -> Result<SubmissionView, StoreError> {
    let data = serde_json::from_str(&record.data_json).map_err(|source| StoreError::Malformed {
        id: record.id,
        source,
    })?;

    Ok(SubmissionView {
        id: record.id,
        form_type: record.form_type,
        submitted_at: record.submitted_at,
        data,
    })
}

pub fn to_views(records: Vec<SubmissionRecord>) -> Result<Vec<SubmissionView>, StoreError> {
    records.into_iter().map(to_view).collect()
}
