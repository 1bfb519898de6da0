//! SQLite message repository implementation.
//!
//! History queries order by the timestamp column alone; there is no
//! sequence column, so rows sharing a timestamp have no defined relative
//! order.

use chrono::Utc;
use senpai_core::repository::message::MessageRepository;
use senpai_types::error::RepositoryError;
use senpai_types::message::{Message, NewMessage};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn message_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Message, RepositoryError> {
    let timestamp: String = row
        .try_get("timestamp")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Message {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        character_id: row
            .try_get("character_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        content: row
            .try_get("content")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        is_user: row
            .try_get("is_user")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        timestamp: parse_datetime(&timestamp)?,
    })
}

impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO messages (character_id, content, is_user, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(message.character_id)
        .bind(&message.content)
        .bind(message.is_user)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Message {
            id: result.last_insert_rowid(),
            character_id: message.character_id,
            content: message.content.clone(),
            is_user: message.is_user,
            timestamp: now,
        })
    }

    async fn list_for_character(&self, character_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM messages WHERE character_id = ? ORDER BY timestamp")
            .bind(character_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(message_from_row).collect()
    }

    async fn clear_for_character(&self, character_id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE character_id = ?")
            .bind(character_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
