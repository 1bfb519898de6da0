//! HTTP request handlers.

pub mod auth;
pub mod character;
pub mod message;
