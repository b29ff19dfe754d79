use anyhow::Result;
use clap::Parser;
use companion_bot::admin;
use companion_bot::cli::{load_config, Cli, Commands};
use companion_bot::config::database_url_from_env;
use companion_bot::run_bot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Setup {
            guild_id,
            channel_id,
        } => {
            let config = admin::setup_chat_channel(&database_url_from_env(), guild_id, channel_id)
                .await?;
            println!(
                "Guild {} will chat in channel {}",
                config.guild_id, channel_id
            );
            Ok(())
        }
        Commands::Context { user_id } => {
            let exchanges = admin::show_context(&database_url_from_env(), user_id).await?;
            if exchanges.is_empty() {
                println!("No stored context for user {}", user_id);
            }
            for e in exchanges {
                println!("[{}]", e.timestamp.format("%Y-%m-%d %H:%M:%S"));
                println!("  user: {}", e.user_message);
                println!("  bot:  {}", e.bot_response);
            }
            Ok(())
        }
        Commands::ClearContext { user_id } => {
            let removed = admin::clear_context(&database_url_from_env(), user_id).await?;
            println!("Removed {} exchanges for user {}", removed, user_id);
            Ok(())
        }
    }
}
