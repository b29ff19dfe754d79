//! Guild auto-moderation as a chain middleware.

use std::sync::Arc;

use async_trait::async_trait;
use automod::{AutoModConfig, ModerationDetector, Violation};
use dbot_core::{BackgroundTasks, Bot, DbotError, HandlerResponse, Message, Middleware, Result};
use tracing::{error, info, instrument, warn};

/// Runs [`ModerationDetector::check`] on every guild message. A flagged message is deleted, its
/// author timed out and warned, and the chain stops. If the delete or timeout fails (e.g. missing
/// permission) no warning is posted; the message still counts as handled.
pub struct AutoModMiddleware {
    detector: Arc<ModerationDetector>,
    config: AutoModConfig,
    bot: Arc<dyn Bot>,
    tasks: BackgroundTasks,
}

impl AutoModMiddleware {
    pub fn new(
        detector: Arc<ModerationDetector>,
        config: AutoModConfig,
        bot: Arc<dyn Bot>,
        tasks: BackgroundTasks,
    ) -> Self {
        Self {
            detector,
            config,
            bot,
            tasks,
        }
    }

    /// Public notice posted after a timeout.
    pub fn warning_text(&self, message: &Message, violation: Violation) -> String {
        format!(
            "{} has been timed out for **{} minutes** for {}. {}.",
            message.user.mention(),
            self.config.timeout_minutes(),
            violation.offence(),
            violation.rule()
        )
    }

    async fn enforce(&self, message: &Message, violation: Violation) {
        let user_id = message.user.id;
        warn!(
            user_id,
            chat_id = message.chat.id,
            guild_id = ?message.chat.guild_id,
            violation = ?violation,
            "step: AutoModMiddleware message flagged"
        );

        // a failed delete or timeout ends enforcement; no warning is posted
        if let Err(e) = self.bot.delete_message(&message.chat, &message.id).await {
            report_failure("delete_message", user_id, e);
            return;
        }

        if let Err(e) = self
            .bot
            .timeout_member(
                &message.chat,
                &message.user,
                self.config.timeout,
                violation.timeout_reason(),
            )
            .await
        {
            report_failure("timeout_member", user_id, e);
            return;
        }

        let text = self.warning_text(message, violation);
        match self
            .bot
            .send_message_and_return_id(&message.chat, &text)
            .await
        {
            Ok(warning_id) => {
                let bot = self.bot.clone();
                let chat = message.chat.clone();
                let ttl = self.config.warning_ttl;
                self.tasks.spawn("automod_warning_cleanup", async move {
                    tokio::time::sleep(ttl).await;
                    bot.delete_message(&chat, &warning_id).await
                });
            }
            Err(e) => report_failure("send_warning", user_id, e),
        }

        info!(
            user_id,
            violation = ?violation,
            "step: AutoModMiddleware enforcement done"
        );
    }
}

fn report_failure(action: &'static str, user_id: i64, e: DbotError) {
    if e.is_permission_denied() {
        warn!(action, user_id, error = %e, "Moderation action skipped, missing permission");
    } else {
        error!(action, user_id, error = %e, "Moderation action failed");
    }
}

#[async_trait]
impl Middleware for AutoModMiddleware {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !self.config.enabled || !message.chat.is_guild() || message.user.is_bot {
            return Ok(true);
        }
        let Some(member) = message.member.as_ref() else {
            return Ok(true);
        };

        match self
            .detector
            .check(message.user.id, &message.content, member, &self.config)
        {
            Some(violation) => {
                self.enforce(message, violation).await;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
