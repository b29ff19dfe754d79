mod exchange;
mod guild_config;

pub use exchange::Exchange;
pub use guild_config::GuildConfig;
