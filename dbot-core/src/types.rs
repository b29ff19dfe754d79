//! Core types: user, chat, guild member, message, handler response, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, display name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// Platform mention markup for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Where a message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    /// One-to-one conversation with the bot.
    Direct,
    /// Text channel inside a guild.
    Guild,
    /// Thread inside a guild, or any other channel type; neither moderated nor answered.
    Other,
}

/// Chat (channel) identity. `guild_id` is set for guild channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub guild_id: Option<i64>,
    pub kind: ChatKind,
}

impl Chat {
    pub fn is_direct(&self) -> bool {
        self.kind == ChatKind::Direct
    }

    pub fn is_guild(&self) -> bool {
        self.kind == ChatKind::Guild && self.guild_id.is_some()
    }
}

/// Role and permission snapshot of the author inside a guild, taken when the message arrived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    /// Holds the administrator capability in the guild.
    pub is_admin: bool,
    /// Names of the roles the member holds.
    pub role_names: Vec<String>,
}

/// A single inbound message with author, chat, optional guild member data and text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Present for guild messages; `None` in direct messages.
    pub member: Option<Member>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Cross-cutting step wrapped around the handlers. `before` returning false ends the chain with Stop.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, message: &Message) -> crate::error::Result<bool>;
    async fn after(&self, message: &Message, response: &HandlerResponse) -> crate::error::Result<()>;
}
