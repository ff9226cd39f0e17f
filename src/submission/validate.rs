use serde_json::Value;

use super::SubmissionError;
use super::mapping;

pub const MAX_FORM_TYPE_LEN: usize = 100;

/// Returns the trimmed form type.
pub fn form_type(raw: &str) -> Result<&str, SubmissionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::Validation("type is required".to_string()));
    }
    if trimmed.chars().count() > MAX_FORM_TYPE_LEN {
        return Err(SubmissionError::Validation(format!(
            "type must be at most {MAX_FORM_TYPE_LEN} characters"
        )));
    }
    Ok(trimmed)
}

/// Returns the payload text to store.
pub fn payload(data: &Value) -> Result<String, SubmissionError> {
    if data.is_null() {
        return Err(SubmissionError::Validation("data is required".to_string()));
    }

    let text = mapping::encode_payload(data);
    if text.trim().is_empty() || text == "{}" {
        return Err(SubmissionError::Validation("data cannot be empty".to_string()));
    }
    Ok(text)
}
