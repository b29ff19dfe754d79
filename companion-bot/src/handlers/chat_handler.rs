//! Companion chat: answers direct messages and messages in a guild's configured chat channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dbot_core::{BackgroundTasks, Bot, Handler, HandlerResponse, Message, Result};
use llm_client::{reply_or_fallback, LlmClient};
use prompt::build_chat_messages;
use storage::{ContextStore, GuildConfigStore};
use tracing::{debug, info, instrument, warn};

use crate::mention::clean_content;

/// Behaviour knobs taken from the base config.
#[derive(Debug, Clone)]
pub struct ChatHandlerSettings {
    pub bot_prefix: String,
    pub auto_react_emojis: Vec<String>,
    pub store_timeout: Duration,
    pub llm_timeout: Duration,
}

/// Where a message should be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Direct,
    ChatChannel,
}

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    bot_user_id: i64,
    llm_client: Arc<dyn LlmClient>,
    context_store: Arc<dyn ContextStore>,
    guild_configs: Arc<dyn GuildConfigStore>,
    tasks: BackgroundTasks,
    settings: ChatHandlerSettings,
}

impl ChatHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_user_id: i64,
        llm_client: Arc<dyn LlmClient>,
        context_store: Arc<dyn ContextStore>,
        guild_configs: Arc<dyn GuildConfigStore>,
        tasks: BackgroundTasks,
        settings: ChatHandlerSettings,
    ) -> Self {
        Self {
            bot,
            bot_user_id,
            llm_client,
            context_store,
            guild_configs,
            tasks,
            settings,
        }
    }

    async fn route(&self, message: &Message) -> Option<Route> {
        if message.user.is_bot || message.user.id == self.bot_user_id {
            return None;
        }
        if message.chat.is_direct() {
            return Some(Route::Direct);
        }
        let guild_id = message.chat.guild_id.filter(|_| message.chat.is_guild())?;

        let lookup = tokio::time::timeout(
            self.settings.store_timeout,
            self.guild_configs.get_guild_config(guild_id),
        )
        .await;
        match lookup {
            Ok(Ok(Some(config))) if config.is_chat_channel(message.chat.id) => {
                Some(Route::ChatChannel)
            }
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                warn!(guild_id, error = %e, "Failed to read guild config, ignoring message");
                None
            }
            Err(_) => {
                warn!(guild_id, "Guild config read timed out, ignoring message");
                None
            }
        }
    }

    /// Stored exchanges as `(user, bot)` pairs; an unavailable store yields none.
    async fn load_context(&self, user_id: i64) -> Vec<(String, String)> {
        match tokio::time::timeout(
            self.settings.store_timeout,
            self.context_store.get_context(user_id),
        )
        .await
        {
            Ok(Ok(exchanges)) => exchanges
                .into_iter()
                .map(|e| (e.user_message, e.bot_response))
                .collect(),
            Ok(Err(e)) => {
                warn!(user_id, error = %e, "Failed to read context, replying without history");
                Vec::new()
            }
            Err(_) => {
                warn!(user_id, "Context read timed out, replying without history");
                Vec::new()
            }
        }
    }

    fn spawn_reactions(&self, message: &Message) {
        for emoji in &self.settings.auto_react_emojis {
            let bot = self.bot.clone();
            let message = message.clone();
            let emoji = emoji.clone();
            self.tasks.spawn("auto_reaction", async move {
                bot.add_reaction(&message, &emoji).await
            });
        }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(route) = self.route(message).await else {
            debug!("Not a chat message, skipping");
            return Ok(HandlerResponse::Continue);
        };
        let user_id = message.user.id;
        let question = clean_content(&message.content, self.bot_user_id, &self.settings.bot_prefix);
        info!(?route, question_len = question.len(), "step: ChatHandler processing");

        if let Err(e) = self.bot.start_typing(&message.chat).await {
            warn!(error = %e, "Failed to start typing indicator");
        }
        if route == Route::ChatChannel {
            self.spawn_reactions(message);
        }

        let history = self.load_context(user_id).await;
        debug!(history = history.len(), "step: context loaded");
        let messages = build_chat_messages(history, &question);
        let reply = reply_or_fallback(
            self.llm_client.as_ref(),
            messages,
            self.settings.llm_timeout,
        )
        .await;

        if let Err(e) = self.bot.reply_to(message, &reply.text).await {
            if e.is_permission_denied() {
                warn!(error = %e, "Not allowed to reply in this chat");
            } else {
                return Err(e);
            }
        }

        if reply.is_fallback {
            info!("step: fallback reply sent, context unchanged");
        } else {
            let store = self.context_store.clone();
            let answer = reply.text.clone();
            self.tasks.spawn("context_update", async move {
                store.update_context(user_id, &question, &answer).await
            });
            info!("step: reply sent, context update scheduled");
        }

        Ok(HandlerResponse::Reply(reply.text))
    }
}
