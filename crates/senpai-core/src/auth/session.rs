//! Server-side session store keyed by opaque token.
//!
//! Sessions are explicit state injected into request handling, never
//! ambient globals. A session carries only the authenticated user's id.
//! Lifecycle: issued on successful login, dropped on logout or expiry;
//! expired entries are removed lazily when they are next touched.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand_core::{OsRng, RngCore};

use super::password::hex_encode;

/// Token length in bytes (64 hex chars once encoded).
const TOKEN_LEN: usize = 32;

/// How long an issued session stays valid.
const SESSION_TTL_DAYS: i64 = 30;

/// A live session binding an opaque token to a user id.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// In-memory session store.
///
/// Backed by a `DashMap`, so concurrent requests resolve and revoke
/// sessions without any external locking.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::days(SESSION_TTL_DAYS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh session for a user.
    pub fn issue(&self, user_id: i64) -> Session {
        let token = generate_token();
        let expires_at = Utc::now() + self.ttl;
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at,
            },
        );
        Session {
            token,
            user_id,
            expires_at,
        }
    }

    /// Resolve a token to its session, if it exists and has not expired.
    ///
    /// Expired entries are removed on access.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let entry = self.sessions.get(token)?;
        if entry.expires_at <= Utc::now() {
            drop(entry);
            self.sessions.remove(token);
            return None;
        }
        Some(Session {
            token: token.to_string(),
            user_id: entry.user_id,
            expires_at: entry.expires_at,
        })
    }

    /// Invalidate a session server-side. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an opaque session token: 32 OS-random bytes, lowercase hex.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_resolve() {
        let store = SessionStore::new();
        let session = store.issue(7);
        let resolved = store.resolve(&session.token).unwrap();
        assert_eq!(resolved.user_id, 7);
        assert_eq!(resolved.token, session.token);
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = SessionStore::new();
        assert!(store.resolve("no-such-token").is_none());
    }

    #[test]
    fn revoke_drops_the_session() {
        let store = SessionStore::new();
        let session = store.issue(1);
        assert!(store.revoke(&session.token));
        assert!(store.resolve(&session.token).is_none());
        // Second revoke is a no-op
        assert!(!store.revoke(&session.token));
    }

    #[test]
    fn expired_session_is_gone() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        let session = store.issue(1);
        assert!(store.resolve(&session.token).is_none());
    }

    #[test]
    fn tokens_are_unique_and_opaque() {
        let store = SessionStore::new();
        let a = store.issue(1);
        let b = store.issue(1);
        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), TOKEN_LEN * 2);
        assert!(a.token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
