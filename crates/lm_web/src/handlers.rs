use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use lm_core::SentimentReport;
use lm_news::SummarizeRequest;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct FlashcardsRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Parses a JSON body regardless of its content type; an empty body is an
/// empty request.
fn read_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let Json(request) = Json::from_bytes(body)?;
    Ok(request)
}

pub async fn flashcards(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: FlashcardsRequest = read_body(&body)?;
    Ok(Json(state.study.flashcards(request.notes.as_deref()).await?))
}

pub async fn quiz(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: QuizRequest = read_body(&body)?;
    Ok(Json(state.study.quiz(request.text.as_deref()).await?))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SentimentReport>, ApiError> {
    let request: SummarizeRequest = read_body(&body)?;
    let query = request.into_query()?;
    let report = state.news()?.run_query(query).await?;
    Ok(Json(report))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
