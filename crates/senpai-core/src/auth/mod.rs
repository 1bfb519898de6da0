//! Credentials, sessions, and authorization.
//!
//! - `password`: scrypt hashing and constant-time verification
//! - `session`: opaque-token session store with expiry
//! - `service`: login/logout orchestration and the admin gate

pub mod password;
pub mod service;
pub mod session;
