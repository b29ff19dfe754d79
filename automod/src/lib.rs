//! Auto-moderation: spam and link detection for guild messages.
//!
//! ## Modules
//!
//! - [`window`] – MessageWindow, the fixed-capacity FIFO of a user's recent messages
//! - [`detector`] – ModerationDetector (per-user windows, is_spam, check) and Violation
//! - [`link`] – contains_link heuristic
//! - [`exempt`] – is_exempt (administrators and whitelisted roles)
//! - [`config`] – AutoModConfig, validated at load time
//! - [`maintenance`] – periodic eviction of idle users' windows

pub mod config;
pub mod detector;
mod error;
pub mod exempt;
pub mod link;
pub mod maintenance;
pub mod window;

pub use config::{parse_role_list, AutoModConfig, MAX_TIMEOUT};
pub use detector::{ModerationDetector, Violation};
pub use error::ConfigError;
pub use exempt::is_exempt;
pub use link::contains_link;
pub use maintenance::spawn_window_maintenance;
pub use window::{normalize, MessageWindow, WINDOW_CAPACITY};
