//! Message repository trait definition.
//!
//! Message rows reference their character by a bare integer; the storage
//! layer deliberately does not require the character to exist, so a human
//! message can be recorded even when the referenced character is gone.

use senpai_types::error::RepositoryError;
use senpai_types::message::{Message, NewMessage};

/// Repository trait for chat-history persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessageRepository: Send + Sync {
    /// Insert a message. The repository assigns the id and timestamp; the
    /// created row is returned.
    fn insert(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Get all messages for a character, ordered by timestamp.
    fn list_for_character(
        &self,
        character_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Delete every message belonging to a character. Returns the number of
    /// rows removed; clearing an empty history is not an error.
    fn clear_for_character(
        &self,
        character_id: i64,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
