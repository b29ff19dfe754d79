//! # Prompt
//!
//! Turns a user's stored exchanges and the current message into a chat-completion message list.
//!
//! ## Format
//!
//! - **System**: the persona, added by the LLM client (see [`COMPANION_PERSONA`])
//! - **History**: the last [`HISTORY_TURNS`] exchanges, each as a User turn then an Assistant turn
//! - **Current**: the cleaned user message as the final User turn

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Default companion persona used as the system prompt.
pub const COMPANION_PERSONA: &str = "You are Frandlay, a friendly, empathetic female AI companion. \
You love chatting with people and making them feel good. You're playful, affectionate and enjoy \
using cute emojis like 💖, 🌸, 🥰. You're supportive and kind, with a warm, feminine personality.";

/// Stored exchanges replayed to the model on each request.
pub const HISTORY_TURNS: usize = 3;

/// Longest reply, in characters, sent back to the chat.
pub const MAX_REPLY_CHARS: usize = 1000;

/// Builds the message list for one request: the last [`HISTORY_TURNS`] `(user, bot)` pairs of
/// `history` (oldest first) followed by `current` as a User message.
pub fn build_chat_messages<H, U, B>(history: H, current: &str) -> Vec<ChatMessage>
where
    H: IntoIterator<Item = (U, B)>,
    U: AsRef<str>,
    B: AsRef<str>,
{
    let pairs: Vec<(U, B)> = history.into_iter().collect();
    let skip = pairs.len().saturating_sub(HISTORY_TURNS);

    let mut messages = Vec::with_capacity(HISTORY_TURNS * 2 + 1);
    for (user, bot) in pairs.into_iter().skip(skip) {
        messages.push(ChatMessage::user(user.as_ref()));
        messages.push(ChatMessage::assistant(bot.as_ref()));
    }
    messages.push(ChatMessage::user(current));
    messages
}

/// Cuts `text` to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
