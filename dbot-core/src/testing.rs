//! Test support: a [`Bot`] that records every call, and message fixtures.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::bot::Bot;
use crate::error::{DbotError, Result};
use crate::types::{Chat, ChatKind, Member, Message, User};

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send { chat_id: i64, text: String },
    Reply { message_id: String, text: String },
    Delete { chat_id: i64, message_id: String },
    Timeout { user_id: i64, duration: Duration, reason: String },
    Reaction { message_id: String, emoji: String },
    Typing { chat_id: i64 },
}

/// Records calls in order. Actions listed in `denied` fail with [`DbotError::PermissionDenied`]
/// and are not recorded.
#[derive(Default)]
pub struct RecordingBot {
    calls: Mutex<Vec<BotCall>>,
    denied: Vec<&'static str>,
    next_id: AtomicU64,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(900_000),
            ..Default::default()
        }
    }

    /// Bot whose named actions (`"delete"`, `"timeout"`, `"send"`, `"reply"`, `"reaction"`) are refused.
    pub fn denying(actions: &[&'static str]) -> Self {
        Self {
            denied: actions.to_vec(),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, action: &'static str, call: BotCall) -> Result<()> {
        if self.denied.contains(&action) {
            return Err(DbotError::PermissionDenied(format!("{} refused", action)));
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record(
            "send",
            BotCall::Send {
                chat_id: chat.id,
                text: text.to_string(),
            },
        )?;
        Ok((self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(
            "reply",
            BotCall::Reply {
                message_id: message.id.clone(),
                text: text.to_string(),
            },
        )
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.record(
            "delete",
            BotCall::Delete {
                chat_id: chat.id,
                message_id: message_id.to_string(),
            },
        )
    }

    async fn timeout_member(
        &self,
        _chat: &Chat,
        user: &User,
        duration: Duration,
        reason: &str,
    ) -> Result<()> {
        self.record(
            "timeout",
            BotCall::Timeout {
                user_id: user.id,
                duration,
                reason: reason.to_string(),
            },
        )
    }

    async fn add_reaction(&self, message: &Message, emoji: &str) -> Result<()> {
        self.record(
            "reaction",
            BotCall::Reaction {
                message_id: message.id.clone(),
                emoji: emoji.to_string(),
            },
        )
    }

    async fn start_typing(&self, chat: &Chat) -> Result<()> {
        self.record("typing", BotCall::Typing { chat_id: chat.id })
    }
}

fn user(user_id: i64) -> User {
    User {
        id: user_id,
        username: Some(format!("user{}", user_id)),
        display_name: Some(format!("User {}", user_id)),
        is_bot: false,
    }
}

/// Guild text message from `user_id` in `channel_id` of `guild_id`, author holding `member`.
pub fn guild_message(
    user_id: i64,
    guild_id: i64,
    channel_id: i64,
    content: &str,
    member: Member,
) -> Message {
    Message {
        id: format!("{}{}", channel_id, user_id),
        user: user(user_id),
        chat: Chat {
            id: channel_id,
            guild_id: Some(guild_id),
            kind: ChatKind::Guild,
        },
        member: Some(member),
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

/// Direct message from `user_id`.
pub fn direct_message(user_id: i64, content: &str) -> Message {
    Message {
        id: format!("dm{}", user_id),
        user: user(user_id),
        chat: Chat {
            id: 10_000 + user_id,
            guild_id: None,
            kind: ChatKind::Direct,
        },
        member: None,
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

/// Member without admin capability holding the named roles.
pub fn member_with_roles(roles: &[&str]) -> Member {
    Member {
        is_admin: false,
        role_names: roles.iter().map(|r| r.to_string()).collect(),
    }
}
