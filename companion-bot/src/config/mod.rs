//! Bot configuration: BaseConfig (Discord + log + DB + chat behaviour) plus the LLM and
//! auto-moderation configs owned by their crates.

mod base;
mod bot_config;


pub use base::{database_url_from_env, BaseConfig, DEFAULT_DATABASE_URL};
pub use bot_config::BotConfig;
