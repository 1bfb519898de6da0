use thiserror::Error;

/// Errors related to character operations.
#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("character not found")]
    NotFound,

    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from password hashing.
///
/// Verification never returns an error: malformed records fail closed and
/// produce a plain `false`.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("key derivation failed")]
    Derivation,
}

/// Errors related to login and session authorization.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately one variant so the
    /// two cases are indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid, or expired session, or a session whose user lacks
    /// the required handle. One variant for the same reason as above.
    #[error("unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in senpai-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_error_display() {
        let err = CharacterError::Invalid {
            field: "imageUrl".to_string(),
            reason: "must be an http(s) URL".to_string(),
        };
        assert_eq!(err.to_string(), "invalid imageUrl: must be an http(s) URL");
    }

    #[test]
    fn auth_error_display() {
        assert_eq!(AuthError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
