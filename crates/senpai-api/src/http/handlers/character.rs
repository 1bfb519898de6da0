//! Character CRUD handlers.
//!
//! Reads are public; every mutation requires the admin session via the
//! [`AdminUser`] extractor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use senpai_types::character::{Character, CreateCharacterRequest, UpdateCharacterRequest};

use crate::http::error::AppError;
use crate::http::extractors::session::AdminUser;
use crate::state::AppState;

/// GET /api/characters - List all characters.
pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, AppError> {
    let characters = state.character_service.list().await?;
    Ok(Json(characters))
}

/// GET /api/characters/{id} - Fetch one character.
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Character>, AppError> {
    let character = state.character_service.get(id).await?;
    Ok(Json(character))
}

/// POST /api/characters - Create a character.
pub async fn create_character(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), AppError> {
    let character = state.character_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// PATCH /api/characters/{id} - Partially update a character.
pub async fn update_character(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCharacterRequest>,
) -> Result<Json<Character>, AppError> {
    let character = state.character_service.update(id, body).await?;
    Ok(Json(character))
}

/// DELETE /api/characters/{id} - Delete a character permanently.
pub async fn delete_character(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.character_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
