use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewSubmission, SubmissionRecord};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<SubmissionRecord, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRecord>(
        "INSERT INTO form_submissions (id, form_type, submitted_at, data_json)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(new.id)
    .bind(&new.form_type)
    .bind(new.submitted_at)
    .bind(&new.data_json)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SubmissionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRecord>("SELECT * FROM form_submissions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRecord>(
        "SELECT * FROM form_submissions
         ORDER BY submitted_at DESC, seq DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Literal, case-sensitive match against the stored payload text.
/// `strpos` avoids LIKE so `%` and `_` in the needle are not wildcards.
pub async fn search(pool: &PgPool, needle: &str) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRecord>(
        "SELECT * FROM form_submissions
         WHERE strpos(data_json, $1) > 0
         ORDER BY submitted_at DESC, seq DESC",
    )
    .bind(needle)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM form_submissions")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
