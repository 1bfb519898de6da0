//! SQLite user repository implementation.

use chrono::Utc;
use senpai_core::repository::user::UserRepository;
use senpai_types::error::RepositoryError;
use senpai_types::user::{NewUser, User};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        username: row
            .try_get("username")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        password: row
            .try_get("password")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                username: user.username.clone(),
                password: user.password.clone(),
                created_at: now,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "username '{}' already exists",
                    user.username
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "deadbeef.cafebabe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = SqliteUserRepository::new(test_pool().await);

        let created = repo.create(&make_user("admin")).await.unwrap();
        assert!(created.id > 0);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "admin");

        let by_name = repo.get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.password, "deadbeef.cafebabe");
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let repo = SqliteUserRepository::new(test_pool().await);
        assert!(repo.get_by_id(9).await.unwrap().is_none());
        assert!(repo.get_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = SqliteUserRepository::new(test_pool().await);
        repo.create(&make_user("admin")).await.unwrap();

        let err = repo.create(&make_user("admin")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
