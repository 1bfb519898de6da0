//! SQLite character repository implementation.
//!
//! Implements `CharacterRepository` from `senpai-core` using sqlx with
//! split read/write pools.

use chrono::Utc;
use senpai_core::repository::character::CharacterRepository;
use senpai_types::character::{Character, NewCharacter};
use senpai_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `CharacterRepository`.
pub struct SqliteCharacterRepository {
    pool: DatabasePool,
}

impl SqliteCharacterRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn character_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Character, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Character {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        anime: row
            .try_get("anime")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        image_url: row
            .try_get("image_url")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        personality: row
            .try_get("personality")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl CharacterRepository for SqliteCharacterRepository {
    async fn create(&self, character: &NewCharacter) -> Result<Character, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO characters (name, anime, description, image_url, personality, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&character.name)
        .bind(&character.anime)
        .bind(&character.description)
        .bind(&character.image_url)
        .bind(&character.personality)
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Character {
            id: result.last_insert_rowid(),
            name: character.name.clone(),
            anime: character.anime.clone(),
            description: character.description.clone(),
            image_url: character.image_url.clone(),
            personality: character.personality.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Character>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(character_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM characters ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(character_from_row).collect()
    }

    async fn update(&self, character: &Character) -> Result<Character, RepositoryError> {
        let result = sqlx::query(
            "UPDATE characters SET name = ?, anime = ?, description = ?, image_url = ?, personality = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&character.name)
        .bind(&character.anime)
        .bind(&character.description)
        .bind(&character.image_url)
        .bind(&character.personality)
        .bind(format_datetime(&character.updated_at))
        .bind(character.id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(character.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
