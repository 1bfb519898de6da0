//! Chat history handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use senpai_types::message::{Message, SendMessageRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/characters/{id}/messages - List a character's history in
/// timestamp order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.chat_service.list_messages(character_id).await?;
    Ok(Json(messages))
}

/// POST /api/characters/{id}/messages - Persist the human message and
/// attempt a generated reply.
///
/// Responds with `[human]` when generation fails for any reason, or
/// `[human, reply]` when it succeeds; generation failure is never an HTTP
/// error.
pub async fn send_message(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Vec<Message>>, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let exchange = state
        .chat_service
        .send_message(character_id, body.content)
        .await?;
    Ok(Json(exchange.into_messages()))
}

/// DELETE /api/characters/{id}/messages - Clear a character's history.
///
/// TODO: this endpoint is open to anonymous callers while every character
/// mutation requires the admin session; decide whether clearing needs the
/// admin gate too and adjust the client alongside.
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let removed = state.chat_service.clear_messages(character_id).await?;
    tracing::debug!(character_id, removed, "cleared chat history");
    Ok(StatusCode::NO_CONTENT)
}
