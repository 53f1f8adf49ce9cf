use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use astra_core::types::{query_or, DEFAULT_NEWS_QUERY, NO_ARTICLES_MESSAGE};
use astra_core::{Article, NewsOutcome};
use astra_news::client::MAX_PAGE_SIZE;
use crate::error::ApiError;
use crate::AppState;

/// Token budget for `/api/llm` completions.
pub const LLM_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LlmResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Only a JSON object is a valid body. The derived `Deserialize` would also
/// accept a sequence like `["text"]`, so the shape is checked first.
fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<QueryRequest, ApiError> {
    let Json(value) = payload.map_err(|rejection| {
        ApiError::validation(format!("Request body must be a JSON object: {}", rejection.body_text()))
    })?;
    if !value.is_object() {
        return Err(ApiError::validation("Request body must be a JSON object"));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e)))
}

pub async fn llm_response(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LlmResponse>, ApiError> {
    let request = body(payload)?;
    let query = query_or(request.query.as_deref(), "");
    if query.is_empty() {
        return Err(ApiError::validation("No query provided"));
    }

    let response = state.model.complete(query, LLM_MAX_TOKENS).await?;
    Ok(Json(LlmResponse { response }))
}

pub async fn news_response(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NewsResponse>, ApiError> {
    let request = body(payload)?;
    let query = query_or(request.query.as_deref(), DEFAULT_NEWS_QUERY);

    let response = match state.news.search(query, MAX_PAGE_SIZE).await? {
        NewsOutcome::Empty => NewsResponse {
            articles: vec![],
            message: Some(NO_ARTICLES_MESSAGE),
        },
        NewsOutcome::Articles(articles) => NewsResponse {
            articles,
            message: None,
        },
    };
    Ok(Json(response))
}

pub async fn news_summary_response(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let request = body(payload)?;
    let query = query_or(request.query.as_deref(), DEFAULT_NEWS_QUERY);

    let summary = state.summarizer.summarize(query).await?.into_text();
    Ok(Json(SummaryResponse { summary }))
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
