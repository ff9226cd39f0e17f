pub mod mapping;
pub mod parser;
pub mod seed;
pub mod service;
pub mod validate;

use crate::db::StoreError;

pub use service::Submissions;

#[derive(Debug)]
pub enum SubmissionError {
    Validation(String),
    NotFound,
    Storage(StoreError),
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            SubmissionError::NotFound => write!(f, "Submission not found"),
            SubmissionError::Storage(err) => write!(f, "Storage failure: {err}"),
        }
    }
}

impl std::error::Error for SubmissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmissionError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        SubmissionError::Storage(err)
    }
}
