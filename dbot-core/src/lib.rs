//! # dbot-core
//!
//! Core types and traits for the companion bot: [`Bot`], [`Handler`], [`Middleware`], message,
//! user and guild-member types, the background task group, and tracing initialization.
//! Transport-agnostic; used by dbot-discord, handler-chain, middleware and companion-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod tasks;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use tasks::BackgroundTasks;
pub use types::{
    Chat, ChatKind, Handler, HandlerResponse, Member, Message, Middleware, ToCoreMessage,
    ToCoreUser, User,
};
