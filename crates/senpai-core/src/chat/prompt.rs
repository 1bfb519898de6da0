//! Prompt construction for character replies.

use senpai_types::llm::{CompletionRequest, MessageRole, PromptMessage};

/// Build the two-turn completion request for a character reply: a system
/// instruction embedding the character's name and personality, followed by
/// the user's raw message.
///
/// The model is left empty so the provider substitutes its configured
/// default.
pub fn character_prompt(name: &str, personality: &str, user_message: &str) -> CompletionRequest {
    let system = format!(
        "You are {name}, a character with the following personality: {personality}. \
Respond to the user's message while staying in character."
    );

    CompletionRequest {
        model: String::new(),
        messages: vec![
            PromptMessage {
                role: MessageRole::System,
                content: system,
            },
            PromptMessage {
                role: MessageRole::User,
                content: user_message.to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_has_system_then_user_turn() {
        let request = character_prompt("Rin", "soft-spoken and observant", "hi there");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.messages[1].content, "hi there");
    }

    #[test]
    fn system_turn_embeds_name_and_personality() {
        let request = character_prompt("Rin", "soft-spoken and observant", "hi");
        let system = &request.messages[0].content;
        assert!(system.contains("Rin"));
        assert!(system.contains("soft-spoken and observant"));
        assert!(system.contains("staying in character"));
    }

    #[test]
    fn model_is_left_to_the_provider() {
        let request = character_prompt("Rin", "calm", "hi");
        assert!(request.model.is_empty());
    }
}
