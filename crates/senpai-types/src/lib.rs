//! Shared domain types for Senpai.
//!
//! This crate contains the core domain types used across the Senpai service:
//! Character, Message, User, the chat-completion wire types, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod character;
pub mod error;
pub mod llm;
pub mod message;
pub mod user;
