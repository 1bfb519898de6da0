//! Chat service orchestrating the message exchange flow.
//!
//! The send flow is two-phase and tolerates partial failure: the human
//! message is persisted first and unconditionally; reply generation runs
//! afterwards and any failure there (missing character, network error,
//! malformed upstream body, even a storage error while saving the reply)
//! is logged and swallowed. The human message is always durable regardless
//! of the generation outcome.

use senpai_types::error::RepositoryError;
use senpai_types::llm::LlmError;
use senpai_types::message::{Message, NewMessage};
use thiserror::Error;
use tracing::{debug, warn};

use crate::chat::prompt::character_prompt;
use crate::llm::box_provider::BoxLlmProvider;
use crate::repository::character::CharacterRepository;
use crate::repository::message::MessageRepository;

/// Outcome of a send: the durably persisted human message and, when
/// generation succeeded, the persisted reply.
#[derive(Debug, Clone)]
pub struct MessageExchange {
    pub user_message: Message,
    pub reply: Option<Message>,
}

impl MessageExchange {
    /// Flatten into the wire shape: `[human]` or `[human, reply]`.
    pub fn into_messages(self) -> Vec<Message> {
        let mut messages = vec![self.user_message];
        messages.extend(self.reply);
        messages
    }
}

/// Why a reply could not be produced. Internal to the send flow -- callers
/// only ever observe the absent reply.
#[derive(Debug, Error)]
enum GenerationError {
    #[error("character not found")]
    CharacterMissing,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Orchestrates message persistence and reply generation.
///
/// Generic over the repository ports; the provider is boxed so the
/// application can select it at runtime.
pub struct ChatService<C: CharacterRepository, M: MessageRepository> {
    characters: C,
    messages: M,
    provider: BoxLlmProvider,
}

impl<C: CharacterRepository, M: MessageRepository> ChatService<C, M> {
    pub fn new(characters: C, messages: M, provider: BoxLlmProvider) -> Self {
        Self {
            characters,
            messages,
            provider,
        }
    }

    /// Persist a human message and attempt to generate a reply.
    ///
    /// Only a storage failure on the *human* message fails the operation;
    /// everything downstream degrades to a reply-less exchange.
    pub async fn send_message(
        &self,
        character_id: i64,
        content: String,
    ) -> Result<MessageExchange, RepositoryError> {
        let user_message = self
            .messages
            .insert(&NewMessage {
                character_id,
                content,
                is_user: true,
            })
            .await?;

        let reply = match self.generate_reply(character_id, &user_message.content).await {
            Ok(reply) => {
                debug!(character_id, "generated reply");
                Some(reply)
            }
            Err(err) => {
                warn!(character_id, error = %err, "reply generation failed; returning the user message only");
                None
            }
        };

        Ok(MessageExchange {
            user_message,
            reply,
        })
    }

    /// Look up the character, call the provider, persist the reply.
    async fn generate_reply(
        &self,
        character_id: i64,
        user_content: &str,
    ) -> Result<Message, GenerationError> {
        let character = self
            .characters
            .get_by_id(character_id)
            .await?
            .ok_or(GenerationError::CharacterMissing)?;

        let request = character_prompt(&character.name, &character.personality, user_content);
        let response = self.provider.complete(&request).await?;

        let reply = self
            .messages
            .insert(&NewMessage {
                character_id,
                content: response.content,
                is_user: false,
            })
            .await?;
        Ok(reply)
    }

    /// Get a character's history in timestamp order.
    pub async fn list_messages(&self, character_id: i64) -> Result<Vec<Message>, RepositoryError> {
        self.messages.list_for_character(character_id).await
    }

    /// Delete a character's entire history. Returns the number of rows
    /// removed.
    pub async fn clear_messages(&self, character_id: i64) -> Result<u64, RepositoryError> {
        self.messages.clear_for_character(character_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    use senpai_types::character::{Character, NewCharacter};
    use senpai_types::llm::{CompletionRequest, CompletionResponse};

    use crate::llm::provider::LlmProvider;

    /// In-memory character repository holding a fixed set of rows.
    #[derive(Default)]
    struct MemoryCharacters {
        rows: Vec<Character>,
    }

    impl MemoryCharacters {
        fn with_character(id: i64, name: &str, personality: &str) -> Self {
            let now = Utc::now();
            Self {
                rows: vec![Character {
                    id,
                    name: name.to_string(),
                    anime: "Test Anime".to_string(),
                    description: "test".to_string(),
                    image_url: "https://example.com/c.png".to_string(),
                    personality: personality.to_string(),
                    created_at: now,
                    updated_at: now,
                }],
            }
        }
    }

    impl CharacterRepository for MemoryCharacters {
        async fn create(&self, _character: &NewCharacter) -> Result<Character, RepositoryError> {
            unimplemented!("not exercised by the chat flow")
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<Character>, RepositoryError> {
            Ok(self.rows.iter().find(|c| c.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<Character>, RepositoryError> {
            Ok(self.rows.clone())
        }

        async fn update(&self, _character: &Character) -> Result<Character, RepositoryError> {
            unimplemented!("not exercised by the chat flow")
        }

        async fn delete(&self, _id: i64) -> Result<(), RepositoryError> {
            unimplemented!("not exercised by the chat flow")
        }
    }

    /// In-memory message repository with monotonically increasing ids.
    #[derive(Default)]
    struct MemoryMessages {
        rows: Mutex<Vec<Message>>,
    }

    impl MessageRepository for MemoryMessages {
        async fn insert(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let created = Message {
                id: rows.len() as i64 + 1,
                character_id: message.character_id,
                content: message.content.clone(),
                is_user: message.is_user,
                timestamp: Utc::now(),
            };
            rows.push(created.clone());
            Ok(created)
        }

        async fn list_for_character(
            &self,
            character_id: i64,
        ) -> Result<Vec<Message>, RepositoryError> {
            let mut rows: Vec<Message> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.character_id == character_id)
                .cloned()
                .collect();
            rows.sort_by_key(|m| m.timestamp);
            Ok(rows)
        }

        async fn clear_for_character(&self, character_id: i64) -> Result<u64, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.character_id != character_id);
            Ok((before - rows.len()) as u64)
        }
    }

    /// Stub provider: either a canned reply or a hard failure.
    struct StubProvider {
        reply: Option<&'static str>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.reply {
                Some(content) => Ok(CompletionResponse {
                    content: content.to_string(),
                }),
                None => Err(LlmError::Provider {
                    message: "stub failure".to_string(),
                }),
            }
        }
    }

    fn chat(
        characters: MemoryCharacters,
        reply: Option<&'static str>,
    ) -> ChatService<MemoryCharacters, MemoryMessages> {
        ChatService::new(
            characters,
            MemoryMessages::default(),
            BoxLlmProvider::new(StubProvider { reply }),
        )
    }

    #[tokio::test]
    async fn successful_generation_returns_both_messages_in_order() {
        let service = chat(
            MemoryCharacters::with_character(5, "Rin", "calm"),
            Some("Hello!"),
        );

        let exchange = service.send_message(5, "hi".to_string()).await.unwrap();
        let messages = exchange.into_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hi");
        assert!(messages[0].is_user);
        assert_eq!(messages[1].content, "Hello!");
        assert!(!messages[1].is_user);

        let stored = service.list_messages(5).await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn failed_generation_still_persists_the_human_message() {
        let service = chat(MemoryCharacters::with_character(5, "Rin", "calm"), None);

        let exchange = service.send_message(5, "hi".to_string()).await.unwrap();
        assert!(exchange.reply.is_none());
        assert_eq!(exchange.user_message.content, "hi");
        assert!(exchange.user_message.is_user);

        // Exactly one row durably stored
        let stored = service.list_messages(5).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content, "hi");
    }

    #[tokio::test]
    async fn missing_character_still_persists_the_human_message() {
        // Generator would succeed, but the character does not exist
        let service = chat(MemoryCharacters::default(), Some("Hello!"));

        let exchange = service.send_message(5, "hi".to_string()).await.unwrap();
        assert!(exchange.reply.is_none());

        let stored = service.list_messages(5).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_user);
    }

    #[tokio::test]
    async fn clear_only_removes_that_characters_history() {
        let service = chat(MemoryCharacters::with_character(3, "Rin", "calm"), None);
        service.send_message(3, "one".to_string()).await.unwrap();
        service.send_message(3, "two".to_string()).await.unwrap();
        service.send_message(4, "other".to_string()).await.unwrap();

        let removed = service.clear_messages(3).await.unwrap();
        assert_eq!(removed, 2);
        assert!(service.list_messages(3).await.unwrap().is_empty());
        assert_eq!(service.list_messages(4).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clearing_an_empty_history_is_not_an_error() {
        let service = chat(MemoryCharacters::default(), None);
        assert_eq!(service.clear_messages(9).await.unwrap(), 0);
    }
}
