use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use automod::spawn_window_maintenance;
use dbot_core::init_tracing;
use dbot_discord::{run_gateway, DiscordBotAdapter};
use tracing::{error, info, instrument, warn};
use twilight_http::Client as HttpClient;

use crate::components::{build_bot_components, build_handler_chain, create_stores};
use crate::config::BotConfig;

/// Bound on a single Discord REST call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// How often idle message windows are swept.
const WINDOW_MAINTENANCE_INTERVAL: Duration = Duration::from_secs(300);
/// How long shutdown waits for pending context writes and warning cleanups.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(15);

/// Main entry: validate config, init logging, build components and the handler chain, then run
/// the gateway until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        automod_enabled = config.automod.enabled,
        spam_threshold = config.automod.spam_threshold,
        "Initializing bot"
    );

    let http = Arc::new(
        HttpClient::builder()
            .token(config.bot_token().to_string())
            .timeout(HTTP_TIMEOUT)
            .build(),
    );
    let adapter = DiscordBotAdapter::new(http.clone());
    let bot_user_id = adapter
        .current_user_id()
        .await
        .context("Failed to fetch the bot user; check DISCORD_TOKEN")?;

    let stores = create_stores(config.database_url()).await?;
    let components = build_bot_components(&config, Arc::new(adapter), bot_user_id, stores);
    let handler_chain = build_handler_chain(&config, &components);
    let maintenance = spawn_window_maintenance(
        components.detector.clone(),
        WINDOW_MAINTENANCE_INTERVAL,
        config.automod.window_idle,
    );

    info!(bot_user_id, "Bot started successfully");
    let result = run_gateway(
        config.bot_token().to_string(),
        http,
        handler_chain,
        shutdown_signal(),
    )
    .await;

    maintenance.abort();
    if !components.tasks.shutdown(SHUTDOWN_GRACE).await {
        warn!("Some background tasks were dropped at shutdown");
    }
    info!("Bot stopped");
    result
}

/// Resolves on Ctrl-C. If the signal cannot be installed the bot runs until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
