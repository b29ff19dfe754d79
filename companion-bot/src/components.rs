//! Component factory: builds BotComponents and the handler chain from config. Keeps assembly out of the runner.

use std::sync::Arc;

use anyhow::{Context, Result};
use automod::ModerationDetector;
use dbot_core::{BackgroundTasks, Bot};
use handler_chain::HandlerChain;
use llm_client::{LlmClient, OpenAILlmClient};
use middleware::{AutoModMiddleware, LoggingMiddleware};
use storage::{
    ContextRepository, ContextStore, GuildConfigRepository, GuildConfigStore,
    InMemoryContextStore, InMemoryGuildConfigStore, SqlitePoolManager,
};
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{ChatHandler, ChatHandlerSettings};

/// `DATABASE_URL` value that keeps context and guild settings in process.
pub const IN_MEMORY_DATABASE: &str = "memory";

/// Context and guild-config stores backed by the same database.
#[derive(Clone)]
pub struct Stores {
    pub context: Arc<dyn ContextStore>,
    pub guild_configs: Arc<dyn GuildConfigStore>,
}

/// Core dependencies for run_bot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub bot_user_id: i64,
    pub llm_client: Arc<dyn LlmClient>,
    pub context_store: Arc<dyn ContextStore>,
    pub guild_configs: Arc<dyn GuildConfigStore>,
    pub detector: Arc<ModerationDetector>,
    pub tasks: BackgroundTasks,
}

impl BotComponents {
    /// Replaces the model client (e.g. with a mock in tests).
    pub fn with_llm_client(mut self, llm_client: Arc<dyn LlmClient>) -> Self {
        self.llm_client = llm_client;
        self
    }
}

/// Opens the stores for `database_url`: in-memory for [`IN_MEMORY_DATABASE`], otherwise SQLite
/// with one pool shared by both repositories.
#[instrument]
pub async fn create_stores(database_url: &str) -> Result<Stores> {
    if database_url == IN_MEMORY_DATABASE {
        info!("Using in-memory context and guild stores");
        return Ok(Stores {
            context: Arc::new(InMemoryContextStore::new()),
            guild_configs: Arc::new(InMemoryGuildConfigStore::new()),
        });
    }

    let pool = SqlitePoolManager::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to open database");
        anyhow::anyhow!("Failed to open database {}: {}", database_url, e)
    })?;
    let context = ContextRepository::with_pool(pool.clone())
        .await
        .context("Failed to initialize context storage")?;
    let guild_configs = GuildConfigRepository::with_pool(pool)
        .await
        .context("Failed to initialize guild config storage")?;
    info!(database_url = %database_url, "Using SQLite context and guild stores");

    Ok(Stores {
        context: Arc::new(context),
        guild_configs: Arc::new(guild_configs),
    })
}

/// Builds BotComponents around a platform `bot` acting as `bot_user_id`. The model client comes
/// from the LLM config.
pub fn build_bot_components(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    bot_user_id: i64,
    stores: Stores,
) -> BotComponents {
    let llm = OpenAILlmClient::from_config(&config.llm);
    info!(model = %llm.model(), "LLM client ready");

    BotComponents {
        bot,
        bot_user_id,
        llm_client: Arc::new(llm),
        context_store: stores.context,
        guild_configs: stores.guild_configs,
        detector: Arc::new(ModerationDetector::new()),
        tasks: BackgroundTasks::new(),
    }
}

/// Chat settings derived from the base and LLM config.
pub fn chat_settings(config: &BotConfig) -> ChatHandlerSettings {
    ChatHandlerSettings {
        bot_prefix: config.base.bot_prefix.clone(),
        auto_react_emojis: config.base.auto_react_emojis.clone(),
        store_timeout: config.base.store_timeout,
        llm_timeout: config.llm_timeout(),
    }
}

/// Builds the handler chain (logging → auto-moderation → chat handler).
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let automod = Arc::new(AutoModMiddleware::new(
        components.detector.clone(),
        config.automod.clone(),
        components.bot.clone(),
        components.tasks.clone(),
    ));
    let chat = Arc::new(ChatHandler::new(
        components.bot.clone(),
        components.bot_user_id,
        components.llm_client.clone(),
        components.context_store.clone(),
        components.guild_configs.clone(),
        components.tasks.clone(),
        chat_settings(config),
    ));
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(automod)
        .add_handler(chat)
}
