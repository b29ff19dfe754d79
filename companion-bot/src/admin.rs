//! Administrative actions run from the CLI against the configured database.

use anyhow::{bail, Context, Result};
use storage::{Exchange, GuildConfig};
use tracing::info;

use crate::components::{create_stores, IN_MEMORY_DATABASE};

fn require_persistent(database_url: &str) -> Result<()> {
    if database_url == IN_MEMORY_DATABASE {
        bail!("DATABASE_URL=memory has nothing to administer; point it at the bot's SQLite database");
    }
    Ok(())
}

/// Sets the channel where the bot answers every message in `guild_id`.
pub async fn setup_chat_channel(
    database_url: &str,
    guild_id: i64,
    channel_id: i64,
) -> Result<GuildConfig> {
    require_persistent(database_url)?;
    let stores = create_stores(database_url).await?;
    let config = stores
        .guild_configs
        .set_chat_channel(guild_id, channel_id)
        .await
        .context("Failed to save guild config")?;
    info!(guild_id, channel_id, "Chat channel configured");
    Ok(config)
}

/// The user's stored exchanges, oldest first.
pub async fn show_context(database_url: &str, user_id: i64) -> Result<Vec<Exchange>> {
    require_persistent(database_url)?;
    let stores = create_stores(database_url).await?;
    stores
        .context
        .get_context(user_id)
        .await
        .context("Failed to read context")
}

/// Deletes the user's stored exchanges; returns how many were removed.
pub async fn clear_context(database_url: &str, user_id: i64) -> Result<u64> {
    require_persistent(database_url)?;
    let stores = create_stores(database_url).await?;
    let removed = stores
        .context
        .clear_context(user_id)
        .await
        .context("Failed to clear context")?;
    info!(user_id, removed, "Context cleared");
    Ok(removed)
}
