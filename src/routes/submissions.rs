use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{PagedResult, SearchResult, SubmissionReceipt, SubmissionView};
use crate::state::SharedState;
use crate::submission::parser;
use crate::submission::service::DEFAULT_PAGE_SIZE;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub async fn create(
    State(state): State<SharedState>,
    Path(form_type): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let data = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;
    let receipt = state.submissions.create(&form_type, &data).await?;
    Ok(Json(receipt))
}

/// `?page=&pageSize=` means "use the defaults".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn bad_query(rejection: QueryRejection) -> AppError {
    tracing::debug!("Rejected query string: {rejection}");
    AppError::BadRequest("invalid query parameters".to_string())
}

pub async fn list(
    State(state): State<SharedState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PagedResult>, AppError> {
    let Query(params) = params.map_err(bad_query)?;
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let result = state.submissions.list_page(page, page_size).await?;
    Ok(Json(result))
}

pub async fn search(
    State(state): State<SharedState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let Query(params) = params.map_err(bad_query)?;
    let query = params.query.as_deref().unwrap_or("");
    let result = state.submissions.search(query).await?;
    Ok(Json(result))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionView>, AppError> {
    let id = Uuid::parse_str(id.trim())
        .map_err(|_| AppError::BadRequest("invalid submission id".to_string()))?;
    let submission = state.submissions.get_by_id(id).await?;
    Ok(Json(submission))
}
