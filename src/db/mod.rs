pub mod memory;
pub mod submissions;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::models::{NewSubmission, SubmissionRecord};

pub use memory::MemoryRepo;

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    Conflict(Uuid),
    Malformed { id: Uuid, source: serde_json::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {err}"),
            StoreError::Migrate(err) => write!(f, "Migration error: {err}"),
            StoreError::Conflict(id) => write!(f, "Submission {id} already exists"),
            StoreError::Malformed { id, source } => {
                write!(f, "Stored payload of submission {id} is not valid JSON: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::Migrate(err) => Some(err),
            StoreError::Malformed { source, .. } => Some(source),
            StoreError::Conflict(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migrate(err)
    }
}

/// Keyed collection of submission rows. Payloads cross this boundary as text only.
///
/// All reads order by `submitted_at` descending, then by insertion sequence descending.
#[async_trait]
pub trait SubmissionRepo: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn insert(&self, new: NewSubmission) -> Result<SubmissionRecord, StoreError>;
    async fn count(&self) -> Result<i64, StoreError>;
    async fn list_newest(&self, offset: i64, limit: i64) -> Result<Vec<SubmissionRecord>, StoreError>;
    async fn find_containing(&self, needle: &str) -> Result<Vec<SubmissionRecord>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, StoreError>;
}

/// PostgreSQL-backed repo. Migrations run on connect.
#[derive(Clone)]
pub struct PgRepo {
    pool: PgPool,
}

impl PgRepo {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionRepo for PgRepo {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, new: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        Ok(submissions::create(&self.pool, &new).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(submissions::count(&self.pool).await?)
    }

    async fn list_newest(&self, offset: i64, limit: i64) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(submissions::list(&self.pool, limit, offset).await?)
    }

    async fn find_containing(&self, needle: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(submissions::search(&self.pool, needle).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, StoreError> {
        Ok(submissions::find_by_id(&self.pool, id).await?)
    }
}
