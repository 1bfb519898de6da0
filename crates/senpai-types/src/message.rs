//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One turn in a character's chat history, tagged human or generated.
///
/// Messages are ordered by `timestamp` for display. There is no sequence
/// column, so two rows with an identical timestamp have no defined relative
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub character_id: i64,
    pub content: String,
    /// `true` for human-authored turns, `false` for generated replies.
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload for a message row. The id and timestamp are assigned by
/// the repository at insert time.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub character_id: i64,
    pub content: String,
    pub is_user: bool,
}

/// Body of `POST /api/characters/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_camel_case() {
        let message = Message {
            id: 7,
            character_id: 3,
            content: "hi".to_string(),
            is_user: true,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["characterId"], 3);
        assert_eq!(value["isUser"], true);
        assert!(value.get("is_user").is_none());
    }
}
