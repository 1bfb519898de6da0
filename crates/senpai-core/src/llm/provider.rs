//! LlmProvider trait definition.

use senpai_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in senpai-infra (e.g., `OpenRouterProvider`).
///
/// A call is a single synchronous round trip: no retry, no streaming. The
/// entire call either yields one completion or fails with an `LlmError`.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
