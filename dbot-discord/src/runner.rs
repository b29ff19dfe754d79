//! Shard runner: updates the gateway cache, converts inbound messages to core::Message and
//! passes each one to the HandlerChain in its own task.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use tracing::{debug, error, info, instrument, warn};
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{CloseFrame, Config, Event, EventTypeFlags, Intents, Shard, StreamExt};
use twilight_http::Client as HttpClient;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::adapters::{is_thread_channel, resolve_member, DiscordMessageWrapper};

/// Cache of guilds and roles, used to resolve member roles and admin capability.
pub type GatewayCache = DefaultInMemoryCache;

/// Gateway intents the bot needs: guild metadata, guild and direct messages with content.
pub fn gateway_intents() -> Intents {
    Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::DIRECT_MESSAGES
        | Intents::MESSAGE_CONTENT
}

/// Connects the recommended number of shards and runs them until `shutdown` completes, then
/// closes every shard and waits for its runner to finish.
#[instrument(skip(token, http, handler_chain, shutdown))]
pub async fn run_gateway<S>(
    token: String,
    http: Arc<HttpClient>,
    handler_chain: HandlerChain,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = ()>,
{
    let cache = Arc::new(
        GatewayCache::builder()
            .resource_types(ResourceType::GUILD | ResourceType::ROLE | ResourceType::CHANNEL)
            .build(),
    );

    let config = Config::new(token, gateway_intents());
    let shards = twilight_gateway::create_recommended(&http, config, |_, builder| builder.build())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create shards: {}", e))?;

    let closing = Arc::new(AtomicBool::new(false));
    let mut senders = Vec::new();
    let mut runners = Vec::new();
    for shard in shards {
        senders.push(shard.sender());
        runners.push(tokio::spawn(shard_runner(
            shard,
            cache.clone(),
            handler_chain.clone(),
            closing.clone(),
        )));
    }
    info!(shards = runners.len(), "Gateway started");

    shutdown.await;

    info!("Shutdown requested, closing shards");
    closing.store(true, Ordering::Relaxed);
    for sender in &senders {
        if let Err(e) = sender.close(CloseFrame::NORMAL) {
            warn!(error = %e, "Shard already closed");
        }
    }
    for runner in runners {
        if let Err(e) = runner.await {
            error!(error = %e, "Shard runner panicked");
        }
    }

    Ok(())
}

async fn shard_runner(
    mut shard: Shard,
    cache: Arc<GatewayCache>,
    handler_chain: HandlerChain,
    closing: Arc<AtomicBool>,
) {
    let shard_id = shard.id().number();
    info!(shard_id, "Shard started, listening for events");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(Event::GatewayClose(_)) if closing.load(Ordering::Relaxed) => break,
            Ok(event) => event,
            Err(e) => {
                warn!(shard_id, error = %e, "Error receiving gateway event");
                continue;
            }
        };

        cache.update(&event);

        match event {
            Event::Ready(ready) => {
                info!(shard_id, user = %ready.user.name, user_id = %ready.user.id, "Shard ready");
            }
            Event::MessageCreate(msg) => dispatch_message(&cache, &handler_chain, *msg),
            _ => {}
        }
    }

    info!(shard_id, "Shard event loop ended");
}

fn dispatch_message(cache: &GatewayCache, handler_chain: &HandlerChain, msg: MessageCreate) {
    if msg.author.bot {
        debug!(user = %msg.author.name, "Ignoring bot message");
        return;
    }

    let member = msg.guild_id.map(|guild_id| {
        let role_ids = msg
            .member
            .as_ref()
            .map(|m| m.roles.as_slice())
            .unwrap_or_default();
        resolve_member(cache, guild_id, msg.author.id, role_ids)
    });
    let core_msg = DiscordMessageWrapper {
        message: &msg.0,
        member,
        in_thread: msg.guild_id.is_some() && is_thread_channel(cache, msg.channel_id),
    }
    .to_core();

    let chain = handler_chain.clone();
    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_intents_include_message_content() {
        let intents = gateway_intents();
        assert!(intents.contains(Intents::MESSAGE_CONTENT));
        assert!(intents.contains(Intents::DIRECT_MESSAGES));
        assert!(intents.contains(Intents::GUILD_MESSAGES));
        assert!(!intents.contains(Intents::GUILD_PRESENCES));
    }
}
