//! # companion-bot
//!
//! Discord companion bot: config, component factory, the chat handler, admin actions and the
//! runner that connects everything to the gateway.

pub mod admin;
pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod mention;
pub mod runner;

pub use components::{
    build_bot_components, build_handler_chain, chat_settings, create_stores, BotComponents,
    Stores, IN_MEMORY_DATABASE,
};
pub use config::{BaseConfig, BotConfig};
pub use handlers::{ChatHandler, ChatHandlerSettings};
pub use mention::clean_content;
pub use runner::run_bot;
