use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::models::{NewSubmission, SubmissionRecord};

use super::{StoreError, SubmissionRepo};

/// In-process repo. Lives as long as the process does.
#[derive(Default)]
pub struct MemoryRepo {
    rows: DashMap<Uuid, SubmissionRecord>,
    last_seq: AtomicI64,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows matching `keep`, newest first.
    fn snapshot(&self, keep: impl Fn(&SubmissionRecord) -> bool) -> Vec<SubmissionRecord> {
        let mut rows: Vec<SubmissionRecord> = self
            .rows
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        rows
    }
}

#[async_trait]
impl SubmissionRepo for MemoryRepo {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, new: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        match self.rows.entry(new.id) {
            Entry::Occupied(_) => Err(StoreError::Conflict(new.id)),
            Entry::Vacant(slot) => {
                let record = SubmissionRecord {
                    id: new.id,
                    seq: self.last_seq.fetch_add(1, Ordering::SeqCst) + 1,
                    form_type: new.form_type,
                    submitted_at: new.submitted_at,
                    data_json: new.data_json,
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.len() as i64)
    }

    async fn list_newest(&self, offset: i64, limit: i64) -> Result<Vec<SubmissionRecord>, StoreError> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .snapshot(|_| true)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn find_containing(&self, needle: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(self.snapshot(|row| row.data_json.contains(needle)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, StoreError> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }
}
