//! BotConfig: BaseConfig + LLM config + auto-moderation config. Use load() for env-based loading.

use std::time::Duration;

use anyhow::{Context, Result};
use automod::AutoModConfig;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::BaseConfig;

pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub automod: AutoModConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides
    /// DISCORD_TOKEN. Invalid moderation settings fail here.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let automod = AutoModConfig::from_env().context("Invalid auto-moderation config")?;
        Ok(Self { base, llm, automod })
    }

    /// Validate config. Call after load() to fail fast before connecting.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.automod
            .validate()
            .context("Invalid auto-moderation config")?;
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn llm_timeout(&self) -> Duration {
        self.llm.timeout()
    }
}
