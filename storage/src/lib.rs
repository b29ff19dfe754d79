//! Storage crate: rolling chat context and guild settings.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Exchange, GuildConfig
//! - [`context_store`] – ContextStore trait and CONTEXT_CAPACITY
//! - [`context_repo`] – ContextRepository (SQLite)
//! - [`guild_config_repo`] – GuildConfigStore trait, GuildConfigRepository (SQLite)
//! - [`inmemory`] – in-process implementations of both stores
//! - [`sqlite_pool`] – SqlitePoolManager

mod context_repo;
mod context_store;
mod error;
mod guild_config_repo;
mod inmemory;
mod models;
mod sqlite_pool;

pub use context_repo::ContextRepository;
pub use context_store::{ContextStore, CONTEXT_CAPACITY};
pub use error::StorageError;
pub use guild_config_repo::{GuildConfigRepository, GuildConfigStore};
pub use inmemory::{InMemoryContextStore, InMemoryGuildConfigStore};
pub use models::{Exchange, GuildConfig};
pub use sqlite_pool::SqlitePoolManager;
