//! Base config: Discord connection, logging, database and chat-channel behaviour. Loaded from env.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dbot_discord::DiscordConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/companion.db";

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// DISCORD_TOKEN or BOT_TOKEN
    pub bot_token: String,
    /// Log file path
    pub log_file: String,
    /// Context and guild-config store; `memory` keeps everything in process
    pub database_url: String,
    /// Prefix stripped from chat-channel messages
    pub bot_prefix: String,
    /// Reactions added to chat-channel messages
    pub auto_react_emojis: Vec<String>,
    /// Bound on a context read before replying without history
    pub store_timeout: Duration,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides DISCORD_TOKEN / BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let discord = match token {
            Some(t) => DiscordConfig::with_token(t),
            None => DiscordConfig::from_env().context("DISCORD_TOKEN (or BOT_TOKEN) not set")?,
        };
        let bot_token = discord.bot_token;
        let log_file = discord
            .log_file
            .or_else(|| env::var("LOG_FILE").ok())
            .unwrap_or_else(|| "logs/companion-bot.log".to_string());
        let bot_prefix = env::var("BOT_PREFIX").unwrap_or_else(|_| "!".to_string());
        let auto_react_emojis = env::var("AUTO_REACT_EMOJIS")
            .map(|s| parse_emoji_list(&s))
            .unwrap_or_else(|_| vec!["💖".to_string(), "🌸".to_string()]);
        let store_timeout_secs = match env::var("STORE_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("STORE_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => 5,
        };

        Ok(Self {
            bot_token,
            log_file,
            database_url: database_url_from_env(),
            bot_prefix,
            auto_react_emojis,
            store_timeout: Duration::from_secs(store_timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("Discord bot token is empty");
        }
        if self.store_timeout.is_zero() {
            bail!("STORE_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}

/// DATABASE_URL, or the default SQLite file.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

fn parse_emoji_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}
