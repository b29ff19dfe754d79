//! Minimal Discord config: token and optional log path.
//! Loaded from DISCORD_TOKEN (or BOT_TOKEN) and LOG_FILE.

use anyhow::Result;
use std::env;

pub struct DiscordConfig {
    pub bot_token: String,
    pub log_file: Option<String>,
}

impl DiscordConfig {
    /// DISCORD_TOKEN, falling back to BOT_TOKEN, is required; LOG_FILE is optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("DISCORD_TOKEN")
            .or_else(|_| env::var("BOT_TOKEN"))
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN not set"))?;
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            log_file,
        })
    }

    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            log_file: None,
        }
    }
}
