//! Character repository trait definition.

use senpai_types::character::{Character, NewCharacter};
use senpai_types::error::RepositoryError;

/// Repository trait for character persistence.
///
/// Implementations live in senpai-infra (e.g., SqliteCharacterRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CharacterRepository: Send + Sync {
    /// Insert a new character. The repository assigns the id and both
    /// timestamps; the created row is returned.
    fn create(
        &self,
        character: &NewCharacter,
    ) -> impl std::future::Future<Output = Result<Character, RepositoryError>> + Send;

    /// Get a character by id.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Character>, RepositoryError>> + Send;

    /// List all characters in creation order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Character>, RepositoryError>> + Send;

    /// Overwrite an existing character row. Returns `NotFound` when no row
    /// with the given id exists.
    fn update(
        &self,
        character: &Character,
    ) -> impl std::future::Future<Output = Result<Character, RepositoryError>> + Send;

    /// Permanently delete a character by id. Returns `NotFound` when no row
    /// was deleted.
    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
