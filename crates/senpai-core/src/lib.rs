//! Business logic for Senpai.
//!
//! This crate defines the ports (repository traits), the credential and
//! session services, the message-exchange orchestration, and the
//! chat-completion provider abstraction. It never depends on any specific
//! storage or HTTP technology -- those implementations live in senpai-infra.

pub mod auth;
pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
