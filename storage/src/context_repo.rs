//! SQLite-backed [`ContextStore`].
//!
//! Rows live in `chat_exchanges`; the autoincrement `id` gives the processing order.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::context_store::{ContextStore, CONTEXT_CAPACITY};
use crate::error::StorageError;
use crate::models::Exchange;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ContextRepository {
    pool_manager: SqlitePoolManager,
}

impl ContextRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    /// Uses an existing pool, creating the table if needed.
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating chat_exchanges table if not exists");
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_exchanges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                user_message TEXT NOT NULL,
                bot_response TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_exchanges_user_id ON chat_exchanges(user_id, id)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Number of exchanges stored for the user.
    pub async fn count(&self, user_id: i64) -> Result<i64, StorageError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_exchanges WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(self.pool_manager.pool())
                .await?;
        Ok(count)
    }
}

#[async_trait]
impl ContextStore for ContextRepository {
    #[instrument(skip(self))]
    async fn get_context(&self, user_id: i64) -> Result<Vec<Exchange>, StorageError> {
        let mut exchanges = sqlx::query_as::<_, Exchange>(
            r#"
            SELECT user_message, bot_response, created_at AS timestamp
            FROM chat_exchanges
            WHERE user_id = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(CONTEXT_CAPACITY as i64)
        .fetch_all(self.pool_manager.pool())
        .await?;

        exchanges.reverse();
        debug!(user_id, count = exchanges.len(), "Loaded chat context");
        Ok(exchanges)
    }

    #[instrument(skip(self, user_message, bot_response))]
    async fn update_context(
        &self,
        user_id: i64,
        user_message: &str,
        bot_response: &str,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO chat_exchanges (user_id, user_message, bot_response, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(user_message)
        .bind(bot_response)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let evicted = sqlx::query(
            r#"
            DELETE FROM chat_exchanges
            WHERE user_id = ?
              AND id NOT IN (
                SELECT id FROM chat_exchanges
                WHERE user_id = ?
                ORDER BY id DESC
                LIMIT ?
              )
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(CONTEXT_CAPACITY as i64)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        debug!(user_id, evicted, "Updated chat context");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_context(&self, user_id: i64) -> Result<u64, StorageError> {
        let removed = sqlx::query("DELETE FROM chat_exchanges WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?
            .rows_affected();

        info!(user_id, removed, "Cleared chat context");
        Ok(removed)
    }
}
