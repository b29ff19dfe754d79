//! Per-guild settings written by the setup command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    /// Channel where the bot answers every message. `None` until setup has run.
    pub chat_channel_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    pub fn new(guild_id: i64, chat_channel_id: Option<i64>) -> Self {
        Self {
            guild_id,
            chat_channel_id,
            updated_at: Utc::now(),
        }
    }

    /// True when `channel_id` is the configured chat channel.
    pub fn is_chat_channel(&self, channel_id: i64) -> bool {
        self.chat_channel_id == Some(channel_id)
    }
}
