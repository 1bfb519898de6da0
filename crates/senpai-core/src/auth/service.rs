//! Login, logout, and session authorization.
//!
//! The service owns the session store and looks users up through the
//! `UserRepository` port. Authorization failures are deliberately uniform:
//! a missing session, an expired session, and a session belonging to a
//! non-admin user are all reported as the same `Unauthorized` error.

use senpai_types::error::{AuthError, RepositoryError};
use senpai_types::user::{NewUser, User};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{Session, SessionStore};
use crate::repository::user::UserRepository;

/// The only handle allowed through the admin gate.
pub const ADMIN_USERNAME: &str = "admin";

/// Credential service: password checks, session issuance, admin gate.
///
/// Generic over `UserRepository` to maintain clean architecture --
/// senpai-core never depends on senpai-infra.
pub struct AuthService<U: UserRepository> {
    users: U,
    sessions: SessionStore,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, sessions: SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Create the bootstrap admin account if it does not exist yet.
    ///
    /// Idempotent; called once at startup. The caller decides where the
    /// seed password comes from (environment override or built-in default).
    pub async fn ensure_admin(&self, seed_password: &str) -> Result<(), AuthError> {
        if self
            .users
            .get_by_username(ADMIN_USERNAME)
            .await
            .map_err(storage)?
            .is_some()
        {
            return Ok(());
        }

        let password = hash_password(seed_password)?;
        self.users
            .create(&NewUser {
                username: ADMIN_USERNAME.to_string(),
                password,
            })
            .await
            .map_err(storage)?;
        info!(username = ADMIN_USERNAME, "created bootstrap admin account");
        Ok(())
    }

    /// Verify credentials and issue a session.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let Some(user) = self
            .users
            .get_by_username(username)
            .await
            .map_err(storage)?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.sessions.issue(user.id))
    }

    /// Invalidate a session server-side. Returns whether it existed.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token)
    }

    /// Resolve a session token to its user.
    pub async fn session_user(&self, token: &str) -> Result<User, AuthError> {
        let session = self
            .sessions
            .resolve(token)
            .ok_or(AuthError::Unauthorized)?;
        self.users
            .get_by_id(session.user_id)
            .await
            .map_err(storage)?
            .ok_or(AuthError::Unauthorized)
    }

    /// Resolve a session token and require the admin handle.
    pub async fn authorize_admin(&self, token: &str) -> Result<User, AuthError> {
        let user = self.session_user(token).await?;
        if user.username != ADMIN_USERNAME {
            return Err(AuthError::Unauthorized);
        }
        Ok(user)
    }
}

fn storage(err: RepositoryError) -> AuthError {
    AuthError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory user repository for exercising the service without a database.
    #[derive(Default)]
    struct MemoryUsers {
        rows: Mutex<Vec<User>>,
    }

    impl UserRepository for MemoryUsers {
        async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|u| u.username == user.username) {
                return Err(RepositoryError::Conflict(format!(
                    "username '{}' already exists",
                    user.username
                )));
            }
            let created = User {
                id: rows.len() as i64 + 1,
                username: user.username.clone(),
                password: user.password.clone(),
                created_at: Utc::now(),
            };
            rows.push(created.clone());
            Ok(created)
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
            Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }
    }

    fn service() -> AuthService<MemoryUsers> {
        AuthService::new(MemoryUsers::default(), SessionStore::new())
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();
        auth.ensure_admin("different-seed").await.unwrap();

        let admin = auth.users.get_by_username("admin").await.unwrap().unwrap();
        // The second call must not re-hash with the new seed
        assert!(verify_password("seed-password", &admin.password));
        assert!(!verify_password("different-seed", &admin.password));
    }

    #[tokio::test]
    async fn admin_password_is_stored_hashed() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();
        let admin = auth.users.get_by_username("admin").await.unwrap().unwrap();
        assert_ne!(admin.password, "seed-password");
        assert!(admin.password.contains('.'));
    }

    #[tokio::test]
    async fn login_round_trip() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();

        let session = auth.login("admin", "seed-password").await.unwrap();
        let user = auth.session_user(&session.token).await.unwrap();
        assert_eq!(user.username, "admin");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_user() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();

        let wrong = auth.login("admin", "nope").await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));

        let unknown = auth.login("ghost", "seed-password").await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_invalidates_the_session() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();

        let session = auth.login("admin", "seed-password").await.unwrap();
        assert!(auth.logout(&session.token));
        let err = auth.session_user(&session.token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn admin_gate_rejects_other_users() {
        let auth = service();
        let password = hash_password("pw").unwrap();
        auth.users
            .create(&NewUser {
                username: "viewer".to_string(),
                password,
            })
            .await
            .unwrap();

        let session = auth.login("viewer", "pw").await.unwrap();
        let err = auth.authorize_admin(&session.token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn admin_gate_accepts_the_admin() {
        let auth = service();
        auth.ensure_admin("seed-password").await.unwrap();
        let session = auth.login("admin", "seed-password").await.unwrap();
        let user = auth.authorize_admin(&session.token).await.unwrap();
        assert_eq!(user.username, ADMIN_USERNAME);
    }

    #[tokio::test]
    async fn bogus_token_is_unauthorized() {
        let auth = service();
        let err = auth.authorize_admin("not-a-token").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }
}
