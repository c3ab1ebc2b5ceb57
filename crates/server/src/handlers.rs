//! # Request Handlers
//!
//! One handler per route. The chat handler implements the UI loop contract:
//! a non-empty submission appends the user message, runs the pipeline while
//! holding the session lock, and appends exactly one assistant message on
//! success. A pipeline failure leaves the user message in place with no
//! assistant reply, so the user can simply submit again.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use sqltutor::{Message, QueryResult};
use tracing::info;

/// The embedded chat page.
pub async fn root() -> Html<&'static str> {
    Html(include_str!("../assets/chat.html"))
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The response body for the `/transcript` endpoint.
#[derive(Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<Message>,
}

/// Returns a snapshot of the chat transcript.
pub async fn transcript_handler(State(state): State<AppState>) -> Json<TranscriptResponse> {
    let session = state.chat.lock().await;
    Json(TranscriptResponse {
        messages: session.transcript.messages().to_vec(),
    })
}

/// The request body for the `/chat` endpoint.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// The handler for the `/chat` endpoint.
///
/// Empty or whitespace-only questions are rejected before the transcript or
/// the pipeline is touched.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<QueryResult>, AppError> {
    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::EmptyQuestion);
    }

    info!("Received question: '{question}'");

    // Holding the lock for the whole exchange keeps submissions strictly
    // one at a time.
    let mut session = state.chat.lock().await;
    session.transcript.push_human(&question);

    let result = state.assistant.answer(&question, &*state.db).await?;

    session.transcript.push_ai(result.transcript_text());

    Ok(Json(result))
}
