//! # dbot-discord
//!
//! Discord layer: adapters from twilight models to core types, [`dbot_core::Bot`] over the REST
//! API, minimal config, and the shard runner that feeds inbound messages to a handler chain.
//! No persistence, moderation or AI logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{
    build_member, chat_kind, is_thread_channel, resolve_member, DiscordMessageWrapper,
    DiscordUserWrapper,
};
pub use bot_adapter::{classify_http_failure, DiscordBotAdapter};
pub use config::DiscordConfig;
pub use runner::{gateway_intents, run_gateway, GatewayCache};
