use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::db::SubmissionRepo;
use crate::models::{NewSubmission, PagedResult, SearchResult, SubmissionReceipt, SubmissionView};

use super::{SubmissionError, mapping, validate};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const RECEIPT_MESSAGE: &str = "submitted successfully";

/// The submission store: one insert path and three read queries over a repo.
///
/// Cheap to clone; clones share the same repo.
#[derive(Clone)]
pub struct Submissions {
    repo: Arc<dyn SubmissionRepo>,
}

impl Submissions {
    pub fn new(repo: Arc<dyn SubmissionRepo>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    /// Validate and store a new submission stamped with the current time.
    pub async fn create(
        &self,
        form_type: &str,
        data: &Value,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.create_at(form_type, data, Utc::now()).await
    }

    /// Like [`Submissions::create`] with an explicit timestamp.
    pub async fn create_at(
        &self,
        form_type: &str,
        data: &Value,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let (form_type, data_json) = match validate::form_type(form_type)
            .and_then(|ft| validate::payload(data).map(|text| (ft, text)))
        {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Rejected submission: {e}");
                return Err(e);
            }
        };

        // Postgres keeps microseconds; truncate so every backend returns the same instant.
        let new = NewSubmission {
            id: Uuid::now_v7(),
            form_type: form_type.to_string(),
            submitted_at: submitted_at.trunc_subsecs(6),
            data_json,
        };

        let record = self.repo.insert(new).await?;
        tracing::info!(
            "Stored submission {} for form '{}' ({} backend)",
            record.id,
            record.form_type,
            self.backend()
        );

        Ok(SubmissionReceipt {
            id: record.id,
            form_type: record.form_type,
            message: RECEIPT_MESSAGE.to_string(),
            submitted_at: record.submitted_at,
        })
    }

    pub async fn count(&self) -> Result<i64, SubmissionError> {
        Ok(self.repo.count().await?)
    }

    /// One page of submissions, newest first. Out-of-range arguments are clamped, never rejected.
    pub async fn list_page(&self, page: i64, page_size: i64) -> Result<PagedResult, SubmissionError> {
        let (page, page_size) = normalize_page(page, page_size);
        let offset = (page - 1).saturating_mul(page_size);

        let total_count = self.repo.count().await?;
        let records = self.repo.list_newest(offset, page_size).await?;
        tracing::debug!(
            "Listed page {page} (size {page_size}): {} of {total_count} submissions",
            records.len()
        );

        Ok(PagedResult {
            page,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
            data: mapping::to_views(records)?,
        })
    }

    /// Raw substring match over the stored payload text, newest first.
    ///
    /// Matches anywhere in the serialized JSON, keys included. A blank query
    /// returns the default first page instead.
    pub async fn search(&self, query: &str) -> Result<SearchResult, SubmissionError> {
        if query.trim().is_empty() {
            return Ok(SearchResult::Page(self.list_page(1, DEFAULT_PAGE_SIZE).await?));
        }

        let records = self.repo.find_containing(query).await?;
        tracing::debug!("Search matched {} submissions", records.len());
        Ok(SearchResult::Matches(mapping::to_views(records)?))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<SubmissionView, SubmissionError> {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(SubmissionError::NotFound)?;
        Ok(mapping::to_view(record)?)
    }
}

/// Floors `page` at 1 and clamps `page_size` into `1..=MAX_PAGE_SIZE`.
pub fn normalize_page(page: i64, page_size: i64) -> (i64, i64) {
    (page.max(1), page_size.clamp(1, MAX_PAGE_SIZE))
}

pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}
