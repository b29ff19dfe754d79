//! Process-local stores, used by tests and when `DATABASE_URL=memory`.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::context_store::{ContextStore, CONTEXT_CAPACITY};
use crate::error::StorageError;
use crate::guild_config_repo::GuildConfigStore;
use crate::models::{Exchange, GuildConfig};

#[derive(Debug, Default)]
pub struct InMemoryContextStore {
    contexts: RwLock<HashMap<i64, VecDeque<Exchange>>>,
}

impl InMemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn get_context(&self, user_id: i64) -> Result<Vec<Exchange>, StorageError> {
        let contexts = self.contexts.read().await;
        Ok(contexts
            .get(&user_id)
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn update_context(
        &self,
        user_id: i64,
        user_message: &str,
        bot_response: &str,
    ) -> Result<(), StorageError> {
        let mut contexts = self.contexts.write().await;
        let context = contexts.entry(user_id).or_default();
        context.push_back(Exchange::new(user_message, bot_response));
        while context.len() > CONTEXT_CAPACITY {
            context.pop_front();
        }
        Ok(())
    }

    async fn clear_context(&self, user_id: i64) -> Result<u64, StorageError> {
        let removed = self.contexts.write().await.remove(&user_id);
        Ok(removed.map(|c| c.len() as u64).unwrap_or(0))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryGuildConfigStore {
    configs: RwLock<HashMap<i64, GuildConfig>>,
}

impl InMemoryGuildConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuildConfigStore for InMemoryGuildConfigStore {
    async fn get_guild_config(&self, guild_id: i64) -> Result<Option<GuildConfig>, StorageError> {
        Ok(self.configs.read().await.get(&guild_id).cloned())
    }

    async fn set_chat_channel(
        &self,
        guild_id: i64,
        channel_id: i64,
    ) -> Result<GuildConfig, StorageError> {
        let config = GuildConfig::new(guild_id, Some(channel_id));
        self.configs.write().await.insert(guild_id, config.clone());
        Ok(config)
    }
}
