//! Bounded model call with a fixed fallback.

use std::time::Duration;

use prompt::{truncate_chars, ChatMessage, MAX_REPLY_CHARS};
use tracing::{error, info, warn};

use crate::LlmClient;

/// Sent instead of a model reply when the call fails or times out.
pub const FALLBACK_REPLY: &str = "Sorry, I'm thinking too hard! 😅 Try again! 💖";

/// Text to send back, and whether it came from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub is_fallback: bool,
}

impl ModelReply {
    fn fallback() -> Self {
        Self {
            text: FALLBACK_REPLY.to_string(),
            is_fallback: true,
        }
    }
}

/// Asks the model for a reply, waiting at most `timeout`. Errors, timeouts and empty replies
/// become [`FALLBACK_REPLY`]; long replies are cut to [`MAX_REPLY_CHARS`].
pub async fn reply_or_fallback(
    client: &dyn LlmClient,
    messages: Vec<ChatMessage>,
    timeout: Duration,
) -> ModelReply {
    match tokio::time::timeout(timeout, client.get_llm_response_with_messages(messages)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            info!(reply_len = text.len(), "step: LLM reply received");
            ModelReply {
                text: truncate_chars(text.trim(), MAX_REPLY_CHARS).to_string(),
                is_fallback: false,
            }
        }
        Ok(Ok(_)) => {
            warn!("LLM returned an empty reply, using fallback");
            ModelReply::fallback()
        }
        Ok(Err(e)) => {
            error!(error = %e, "LLM request failed, using fallback");
            ModelReply::fallback()
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "LLM request timed out, using fallback");
            ModelReply::fallback()
        }
    }
}
