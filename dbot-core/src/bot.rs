//! Bot abstraction for the platform side effects the bot performs.
//!
//! [`Bot`] is transport-agnostic; `dbot-discord` implements it over the Discord REST API.

use std::time::Duration;

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message, User};
use async_trait::async_trait;

/// Sending, replying and the moderation actions. Implementations map to a transport (e.g. Discord).
///
/// Implementations must report a refused action as [`DbotError::PermissionDenied`] so callers can
/// skip it instead of treating it as a fault.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a message and returns its id (for a later `delete_message`).
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Sends a reply referencing the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Deletes a message. `message_id` is transport-specific (numeric string on Discord).
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Prevents the user from talking in the chat's guild for `duration`.
    async fn timeout_member(
        &self,
        chat: &Chat,
        user: &User,
        duration: Duration,
        reason: &str,
    ) -> Result<()>;
    /// Adds a unicode emoji reaction to the message.
    async fn add_reaction(&self, message: &Message, emoji: &str) -> Result<()>;
    /// Shows the typing indicator in the chat.
    async fn start_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a message id string into a non-zero u64. Used by delete_message.
pub fn parse_message_id(s: &str) -> Result<u64> {
    match s.parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(DbotError::Bot(format!("Invalid message_id: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(
            parse_message_id("1234567890123456789").unwrap(),
            1234567890123456789
        );
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("0").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
        assert!(parse_message_id("-5").is_err());
    }
}
