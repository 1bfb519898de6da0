//! Character management service.
//!
//! Validates request payloads at the boundary, applies partial updates to
//! the loaded row, and maps repository errors to domain errors.

use chrono::Utc;
use senpai_types::character::{
    Character, CreateCharacterRequest, NewCharacter, UpdateCharacterRequest,
};
use senpai_types::error::{CharacterError, RepositoryError};

use crate::repository::character::CharacterRepository;

/// Service orchestrating the character lifecycle.
///
/// Generic over `CharacterRepository` to maintain clean architecture --
/// senpai-core never depends on senpai-infra.
pub struct CharacterService<C: CharacterRepository> {
    characters: C,
}

impl<C: CharacterRepository> CharacterService<C> {
    pub fn new(characters: C) -> Self {
        Self { characters }
    }

    /// Validate and create a character.
    pub async fn create(&self, request: CreateCharacterRequest) -> Result<Character, CharacterError> {
        request.validate()?;
        self.characters
            .create(&NewCharacter::from(request))
            .await
            .map_err(storage)
    }

    /// Get a character by id.
    pub async fn get(&self, id: i64) -> Result<Character, CharacterError> {
        self.characters
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(CharacterError::NotFound)
    }

    /// List all characters in creation order.
    pub async fn list(&self) -> Result<Vec<Character>, CharacterError> {
        self.characters.list().await.map_err(storage)
    }

    /// Apply a partial update to an existing character.
    ///
    /// Absent fields keep their current value; `updated_at` is refreshed.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateCharacterRequest,
    ) -> Result<Character, CharacterError> {
        request.validate()?;

        let mut character = self.get(id).await?;
        if let Some(name) = request.name {
            character.name = name;
        }
        if let Some(anime) = request.anime {
            character.anime = anime;
        }
        if let Some(description) = request.description {
            character.description = description;
        }
        if let Some(image_url) = request.image_url {
            character.image_url = image_url;
        }
        if let Some(personality) = request.personality {
            character.personality = personality;
        }
        character.updated_at = Utc::now();

        self.characters.update(&character).await.map_err(|e| match e {
            RepositoryError::NotFound => CharacterError::NotFound,
            other => storage(other),
        })
    }

    /// Permanently delete a character.
    pub async fn delete(&self, id: i64) -> Result<(), CharacterError> {
        self.characters.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CharacterError::NotFound,
            other => storage(other),
        })
    }
}

fn storage(err: RepositoryError) -> CharacterError {
    CharacterError::Storage(err.to_string())
}
