//! User account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account that can hold a session. In practice a single seeded admin
/// row exists; it is created at startup if absent and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Stored hash record (`derived-key-hex.salt-hex`), never the plaintext.
    /// Excluded from serialization so it can never leak through a response.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a user row. `password` is the already-derived hash
/// record, not a plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_never_serializes_password() {
        let user = User {
            id: 1,
            username: "admin".to_string(),
            password: "deadbeef.cafe".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "admin");
    }
}
