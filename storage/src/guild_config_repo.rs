//! Guild settings lookup and the SQLite implementation.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::models::GuildConfig;
use crate::sqlite_pool::SqlitePoolManager;

#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    async fn get_guild_config(&self, guild_id: i64) -> Result<Option<GuildConfig>, StorageError>;

    /// Creates or updates the guild's chat channel.
    async fn set_chat_channel(
        &self,
        guild_id: i64,
        channel_id: i64,
    ) -> Result<GuildConfig, StorageError>;
}

#[derive(Clone)]
pub struct GuildConfigRepository {
    pool_manager: SqlitePoolManager,
}

impl GuildConfigRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_configs (
                guild_id INTEGER PRIMARY KEY,
                chat_channel_id INTEGER,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool_manager.pool())
        .await?;

        Ok(Self { pool_manager })
    }
}

#[async_trait]
impl GuildConfigStore for GuildConfigRepository {
    async fn get_guild_config(&self, guild_id: i64) -> Result<Option<GuildConfig>, StorageError> {
        let config = sqlx::query_as::<_, GuildConfig>(
            "SELECT guild_id, chat_channel_id, updated_at FROM guild_configs WHERE guild_id = ?",
        )
        .bind(guild_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(config)
    }

    #[instrument(skip(self))]
    async fn set_chat_channel(
        &self,
        guild_id: i64,
        channel_id: i64,
    ) -> Result<GuildConfig, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO guild_configs (guild_id, chat_channel_id, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(guild_id) DO UPDATE SET
                chat_channel_id = excluded.chat_channel_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(guild_id)
        .bind(channel_id)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!(guild_id, channel_id, "Chat channel configured");

        self.get_guild_config(guild_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("guild config {}", guild_id)))
    }
}
