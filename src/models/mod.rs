pub mod submission;

pub use submission::{NewSubmission, PagedResult, SearchResult, SubmissionReceipt, SubmissionRecord, SubmissionView};
