//! Character profile types and request DTOs.
//!
//! A character is a chat persona: display metadata shown in the gallery plus
//! a personality text that seeds the generation prompt. Characters are
//! mutated only through admin-authorized API calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CharacterError;

/// A chat persona with display metadata and a personality prompt.
///
/// Serialized with camelCase field names -- the JSON shape the web client
/// consumes (`imageUrl`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: String,
    /// Title of the source work the character comes from.
    pub anime: String,
    pub description: String,
    pub image_url: String,
    pub personality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a character row. Timestamps and the id are assigned
/// by the repository at insert time.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub anime: String,
    pub description: String,
    pub image_url: String,
    pub personality: String,
}

/// Body of `POST /api/characters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    pub name: String,
    pub anime: String,
    pub description: String,
    pub image_url: String,
    pub personality: String,
}

impl CreateCharacterRequest {
    /// Validate the payload, naming the offending field in the error.
    pub fn validate(&self) -> Result<(), CharacterError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("anime", &self.anime)?;
        require_non_empty("description", &self.description)?;
        require_non_empty("personality", &self.personality)?;
        require_http_url("imageUrl", &self.image_url)
    }
}

impl From<CreateCharacterRequest> for NewCharacter {
    fn from(request: CreateCharacterRequest) -> Self {
        Self {
            name: request.name,
            anime: request.anime,
            description: request.description,
            image_url: request.image_url,
            personality: request.personality,
        }
    }
}

/// Body of `PATCH /api/characters/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub anime: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub personality: Option<String>,
}

impl UpdateCharacterRequest {
    /// Validate every field that is present.
    pub fn validate(&self) -> Result<(), CharacterError> {
        if let Some(ref name) = self.name {
            require_non_empty("name", name)?;
        }
        if let Some(ref anime) = self.anime {
            require_non_empty("anime", anime)?;
        }
        if let Some(ref description) = self.description {
            require_non_empty("description", description)?;
        }
        if let Some(ref personality) = self.personality {
            require_non_empty("personality", personality)?;
        }
        if let Some(ref image_url) = self.image_url {
            require_http_url("imageUrl", image_url)?;
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CharacterError> {
    if value.trim().is_empty() {
        return Err(CharacterError::Invalid {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), CharacterError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(CharacterError::Invalid {
            field: field.to_string(),
            reason: "must be an http(s) URL".to_string(),
        })
    }
}
