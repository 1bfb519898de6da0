//! OpenRouterProvider -- concrete [`LlmProvider`] implementation for the
//! OpenRouter chat-completions API.
//!
//! Sends a single non-streaming request to `/chat/completions` with bearer
//! authentication. The first choice of the response is authoritative.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use senpai_core::llm::provider::LlmProvider;
use senpai_types::llm::{CompletionRequest, CompletionResponse, LlmError, PromptMessage};

/// OpenRouter chat-completion provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

/// Bound on the outbound completion call. A hung upstream must not pin a
/// request handler indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl OpenRouterProvider {
    const DEFAULT_BASE_URL: &'static str = "https://openrouter.ai/api/v1";

    /// Application title reported to OpenRouter for attribution.
    const APP_TITLE: &'static str = "senpai";

    /// Create a new OpenRouter provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenRouter API key wrapped in SecretString
    /// * `model` - Default model identifier, used when a request leaves the
    ///   model unset
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Pick the model for a request: the request's own, or this provider's
    /// configured default when the request leaves it empty.
    fn effective_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        if request.model.is_empty() {
            &self.model
        } else {
            &request.model
        }
    }
}

// OpenRouterProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state including the API key.

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Deserialize)]
struct WireChoiceMessage {
    content: String,
}

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = WireRequest {
            model: self.effective_model(request),
            messages: &request.messages,
        };
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .header("x-title", Self::APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyCompletion)?;

        Ok(CompletionResponse {
            content: choice.message.content,
        })
    }
}
