//! Wraps the twilight HTTP client and implements [`dbot_core::Bot`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Message, Result, User};
use tracing::debug;
use twilight_http::api_error::ApiError;
use twilight_http::error::ErrorType;
use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_http::request::AuditLogReason;
use twilight_http::Client as HttpClient;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker};
use twilight_model::id::Id;
use twilight_model::util::Timestamp;

/// Thin wrapper around the twilight HTTP client that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct DiscordBotAdapter {
    http: Arc<HttpClient>,
}

impl DiscordBotAdapter {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Id of the account the token belongs to.
    pub async fn current_user_id(&self) -> Result<i64> {
        let user = self
            .http
            .current_user()
            .await
            .map_err(|e| map_http_error("current_user", e))?
            .model()
            .await
            .map_err(|e| DbotError::Bot(format!("current_user: {}", e)))?;
        Ok(user.id.get() as i64)
    }
}

/// Maps a failed platform call to the core error: HTTP 403 (or a Discord "missing permissions"
/// error code) becomes [`DbotError::PermissionDenied`], everything else [`DbotError::Bot`].
pub fn classify_http_failure(
    action: &str,
    status: Option<u16>,
    api_code: Option<u64>,
    detail: &str,
) -> DbotError {
    // 50013: Missing Permissions, 50001: Missing Access
    let forbidden = status == Some(403) || matches!(api_code, Some(50013) | Some(50001));
    if forbidden {
        DbotError::PermissionDenied(format!("{}: {}", action, detail))
    } else {
        DbotError::Bot(format!("{}: {}", action, detail))
    }
}

fn map_http_error(action: &str, e: twilight_http::Error) -> DbotError {
    let (status, api_code) = match e.kind() {
        ErrorType::Response { status, error, .. } => {
            let code = match error {
                ApiError::General(general) => Some(general.code),
                _ => None,
            };
            (Some(status.get()), code)
        }
        _ => (None, None),
    };
    classify_http_failure(action, status, api_code, &e.to_string())
}

fn id_from_i64<T>(kind: &str, raw: i64) -> Result<Id<T>> {
    u64::try_from(raw)
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| DbotError::Bot(format!("Invalid {} id: {}", kind, raw)))
}

fn channel_id(chat: &Chat) -> Result<Id<ChannelMarker>> {
    id_from_i64("channel", chat.id)
}

fn message_id(raw: &str) -> Result<Id<MessageMarker>> {
    Ok(Id::new(parse_message_id(raw)?))
}

#[async_trait]
impl CoreBot for DiscordBotAdapter {
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .http
            .create_message(channel_id(chat)?)
            .content(text)
            .await
            .map_err(|e| map_http_error("create_message", e))?
            .model()
            .await
            .map_err(|e| DbotError::Bot(format!("create_message: {}", e)))?;
        Ok(sent.id.get().to_string())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.http
            .create_message(channel_id(&message.chat)?)
            .content(text)
            .reply(message_id(&message.id)?)
            .fail_if_not_exists(false)
            .await
            .map_err(|e| map_http_error("reply", e))?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id_str: &str) -> Result<()> {
        self.http
            .delete_message(channel_id(chat)?, message_id(message_id_str)?)
            .await
            .map_err(|e| map_http_error("delete_message", e))?;
        Ok(())
    }

    async fn timeout_member(
        &self,
        chat: &Chat,
        user: &User,
        duration: Duration,
        reason: &str,
    ) -> Result<()> {
        let guild_id: Id<GuildMarker> = match chat.guild_id {
            Some(id) => id_from_i64("guild", id)?,
            None => return Err(DbotError::Bot("timeout_member outside a guild".to_string())),
        };
        let user_id: Id<UserMarker> = id_from_i64("user", user.id)?;
        let until_secs = Utc::now().timestamp() + duration.as_secs() as i64;
        let until = Timestamp::from_secs(until_secs)
            .map_err(|e| DbotError::Bot(format!("Invalid timeout end: {}", e)))?;

        debug!(user_id = user.id, until_secs, "Timing out member");
        self.http
            .update_guild_member(guild_id, user_id)
            .communication_disabled_until(Some(until))
            .reason(reason)
            .await
            .map_err(|e| map_http_error("timeout_member", e))?;
        Ok(())
    }

    async fn add_reaction(&self, message: &Message, emoji: &str) -> Result<()> {
        self.http
            .create_reaction(
                channel_id(&message.chat)?,
                message_id(&message.id)?,
                &RequestReactionType::Unicode { name: emoji },
            )
            .await
            .map_err(|e| map_http_error("add_reaction", e))?;
        Ok(())
    }

    async fn start_typing(&self, chat: &Chat) -> Result<()> {
        self.http
            .create_typing_trigger(channel_id(chat)?)
            .await
            .map_err(|e| map_http_error("typing", e))?;
        Ok(())
    }
}
