//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use senpai_core::auth::service::AuthService;
use senpai_core::auth::session::SessionStore;
use senpai_core::chat::service::ChatService;
use senpai_core::llm::box_provider::BoxLlmProvider;
use senpai_core::service::character::CharacterService;
use senpai_infra::config::{load_config, resolve_data_dir, AppConfig};
use senpai_infra::llm::openrouter::OpenRouterProvider;
use senpai_infra::sqlite::character::SqliteCharacterRepository;
use senpai_infra::sqlite::message::SqliteMessageRepository;
use senpai_infra::sqlite::pool::DatabasePool;
use senpai_infra::sqlite::user::SqliteUserRepository;

/// Fallback bootstrap password, used only when `SENPAI_ADMIN_PASSWORD` is
/// not set. Fine for local development; a deployment must override it.
const DEFAULT_ADMIN_PASSWORD: &str = "senpai-dev-admin";

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteCharacterService = CharacterService<SqliteCharacterRepository>;

pub type ConcreteChatService = ChatService<SqliteCharacterRepository, SqliteMessageRepository>;

pub type ConcreteAuthService = AuthService<SqliteUserRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub character_service: Arc<ConcreteCharacterService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub auth_service: Arc<ConcreteAuthService>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services,
    /// seed the admin account.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("senpai.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire the chat-completion provider. A missing key is not fatal:
        // reply generation fails per-request and the send flow degrades to
        // persisting the human message only.
        let api_key = match std::env::var(&config.llm.api_key_env) {
            Ok(key) if !key.is_empty() => SecretString::from(key),
            _ => {
                tracing::warn!(
                    var = %config.llm.api_key_env,
                    "chat-completion API key not set; reply generation will fail until it is provided"
                );
                SecretString::from(String::new())
            }
        };
        let provider = OpenRouterProvider::new(api_key, config.llm.model.clone())
            .with_base_url(config.llm.base_url.clone());

        // Wire services over the shared pool
        let character_service =
            CharacterService::new(SqliteCharacterRepository::new(db_pool.clone()));
        let chat_service = ChatService::new(
            SqliteCharacterRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            BoxLlmProvider::new(provider),
        );
        let auth_service = AuthService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SessionStore::new(),
        );

        // Seed the admin account
        auth_service.ensure_admin(&admin_seed_password()).await?;

        Ok(Self {
            character_service: Arc::new(character_service),
            chat_service: Arc::new(chat_service),
            auth_service: Arc::new(auth_service),
            config,
            data_dir,
            db_pool,
        })
    }
}

/// Resolve the bootstrap admin password.
///
/// `SENPAI_ADMIN_PASSWORD` wins; the built-in development default is a
/// deployment hazard, so falling back to it is loudly logged.
fn admin_seed_password() -> String {
    match std::env::var("SENPAI_ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            tracing::warn!(
                "SENPAI_ADMIN_PASSWORD not set; the admin account uses the built-in development password"
            );
            DEFAULT_ADMIN_PASSWORD.to_string()
        }
    }
}
