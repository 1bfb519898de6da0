//! Chat-completion request/response types.
//!
//! These model the wire shape of an OpenAI-style chat-completion endpoint:
//! a request carries `{model, messages:[{role, content}]}` and the response
//! yields one completion string. No streaming, tool calling, or usage
//! accounting -- a call either returns one completion or fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in a completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Request to a chat-completion provider.
///
/// An empty `model` means "use the provider's configured default".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
}

/// Response from a chat-completion provider. The first choice of the
/// upstream response is authoritative; everything else is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
}

/// Errors from chat-completion provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("completion contained no choices")]
    EmptyCompletion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_rejects_unknown() {
        assert!("narrator".parse::<MessageRole>().is_err());
    }

    #[test]
    fn prompt_message_serializes_lowercase_role() {
        let message = PromptMessage {
            role: MessageRole::System,
            content: "stay in character".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "system");
    }
}
