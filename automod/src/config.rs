//! Auto-moderation settings: loaded from env, validated before the bot connects.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::window::WINDOW_CAPACITY;

/// Longest member timeout the platform accepts.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(28 * 24 * 60 * 60);

/// Validated auto-moderation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoModConfig {
    pub enabled: bool,
    /// Identical consecutive messages that count as spam. 1..=WINDOW_CAPACITY.
    pub spam_threshold: usize,
    /// How long a flagged member is timed out.
    pub timeout: Duration,
    /// Role names exempt from moderation.
    pub whitelist_roles: Vec<String>,
    /// How long the warning message stays before it is deleted.
    pub warning_ttl: Duration,
    /// Windows of users silent for this long are dropped.
    pub window_idle: Duration,
}

impl Default for AutoModConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spam_threshold: 3,
            timeout: Duration::from_secs(300),
            whitelist_roles: vec!["Moderator".to_string(), "Admin".to_string()],
            warning_ttl: Duration::from_secs(10),
            window_idle: Duration::from_secs(3600),
        }
    }
}

impl AutoModConfig {
    /// Loads `AUTOMOD_*` variables over the defaults and validates the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            enabled: env_parse("AUTOMOD_ENABLED", defaults.enabled)?,
            spam_threshold: env_parse("AUTOMOD_SPAM_THRESHOLD", defaults.spam_threshold)?,
            timeout: Duration::from_secs(env_parse(
                "AUTOMOD_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            whitelist_roles: env::var("AUTOMOD_WHITELIST_ROLES")
                .map(|s| parse_role_list(&s))
                .unwrap_or(defaults.whitelist_roles),
            warning_ttl: Duration::from_secs(env_parse(
                "AUTOMOD_WARNING_TTL_SECS",
                defaults.warning_ttl.as_secs(),
            )?),
            window_idle: Duration::from_secs(env_parse(
                "AUTOMOD_WINDOW_IDLE_SECS",
                defaults.window_idle.as_secs(),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the detector cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spam_threshold == 0 {
            return Err(ConfigError::ThresholdTooSmall);
        }
        if self.spam_threshold > WINDOW_CAPACITY {
            return Err(ConfigError::ThresholdExceedsWindow {
                threshold: self.spam_threshold,
                capacity: WINDOW_CAPACITY,
            });
        }
        if self.timeout.is_zero() || self.timeout > MAX_TIMEOUT {
            return Err(ConfigError::InvalidTimeout(self.timeout.as_secs()));
        }
        if self.warning_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration("AUTOMOD_WARNING_TTL_SECS"));
        }
        if self.window_idle.is_zero() {
            return Err(ConfigError::ZeroDuration("AUTOMOD_WINDOW_IDLE_SECS"));
        }
        Ok(())
    }

    /// Timeout rounded down to whole minutes (at least 1), for warning texts.
    pub fn timeout_minutes(&self) -> u64 {
        (self.timeout.as_secs() / 60).max(1)
    }
}

/// Splits a comma-separated role list, trimming names and dropping empty entries.
pub fn parse_role_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_parse<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        _ => Ok(default),
    }
}
