//! Configuration errors, raised when settings are loaded rather than while handling messages.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Spam threshold must be at least 1")]
    ThresholdTooSmall,

    #[error("Spam threshold {threshold} exceeds the message window capacity {capacity}; it could never trigger")]
    ThresholdExceedsWindow { threshold: usize, capacity: usize },

    #[error("Timeout must be between 1 second and 28 days, got {0} seconds")]
    InvalidTimeout(u64),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}
