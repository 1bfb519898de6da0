//! User repository trait definition.

use senpai_types::error::RepositoryError;
use senpai_types::user::{NewUser, User};

/// Repository trait for user persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Returns `Conflict` when the username is taken.
    fn create(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Get a user by their unique username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
