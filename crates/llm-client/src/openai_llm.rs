//! LlmClient over openai-client; prepends the system prompt to every request.

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, COMPANION_PERSONA};
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient};
use crate::config::{LlmConfig, DEFAULT_MODEL};

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    /// Client configured from an [`LlmConfig`] (base URL, model and system prompt).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configured system prompt, or the companion persona.
    pub fn system_content(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(COMPANION_PERSONA)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(chat_message_to_openai(&ChatMessage::system(
            self.system_content(),
        ))?);
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        self.client
            .chat_completion(&self.model, openai_messages)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_content_defaults_to_persona() {
        let client = OpenAILlmClient::new("test-key".to_string());
        assert_eq!(client.system_content(), COMPANION_PERSONA);
        assert_eq!(client.model(), DEFAULT_MODEL);

        let client = client
            .with_system_prompt("Be brief.")
            .with_model("gpt-4o-mini".to_string());
        assert_eq!(client.system_content(), "Be brief.");
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
