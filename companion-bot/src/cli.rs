//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "companion-bot")]
#[command(about = "Discord companion bot: chat, rolling context and auto-moderation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override DISCORD_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Set the channel where the bot chats in a guild.
    Setup {
        #[arg(long)]
        guild_id: i64,
        #[arg(long)]
        channel_id: i64,
    },
    /// Print a user's stored exchanges.
    Context {
        #[arg(long)]
        user_id: i64,
    },
    /// Delete a user's stored exchanges.
    ClearContext {
        #[arg(long)]
        user_id: i64,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides DISCORD_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["companion-bot", "run", "--token", "abc"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { token: Some(t) } if t == "abc"));
    }

    #[test]
    fn test_parse_setup() {
        let cli = Cli::try_parse_from([
            "companion-bot",
            "setup",
            "--guild-id",
            "10",
            "--channel-id",
            "20",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Setup {
                guild_id: 10,
                channel_id: 20
            }
        ));
    }

    #[test]
    fn test_parse_clear_context_requires_user() {
        assert!(Cli::try_parse_from(["companion-bot", "clear-context"]).is_err());
        let cli =
            Cli::try_parse_from(["companion-bot", "clear-context", "--user-id", "7"]).unwrap();
        assert!(matches!(cli.command, Commands::ClearContext { user_id: 7 }));
    }
}
