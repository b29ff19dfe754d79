//! Per-user spam/link detection.

use std::time::Duration;

use dashmap::DashMap;
use dbot_core::Member;
use tracing::debug;

use crate::config::AutoModConfig;
use crate::exempt::is_exempt;
use crate::link::contains_link;
use crate::window::{normalize, MessageWindow};

/// Why a message was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The newest `threshold` messages of the user are identical.
    Spam,
    /// The message contains a link.
    Link,
}

impl Violation {
    /// Audit-log reason attached to the member timeout.
    pub fn timeout_reason(&self) -> &'static str {
        match self {
            Violation::Spam => "Auto-moderation: Spam detected",
            Violation::Link => "Auto-moderation: Unauthorized link",
        }
    }

    /// What the member did, for the public warning.
    pub fn offence(&self) -> &'static str {
        match self {
            Violation::Spam => "spamming repeated messages",
            Violation::Link => "posting unauthorized links",
        }
    }

    /// Rule reminder appended to the warning.
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::Spam => "Repeated identical messages are not allowed",
            Violation::Link => "Links are not allowed in this server",
        }
    }
}

/// Message windows keyed by user id.
///
/// Each call locks only the user's map shard, so concurrent message tasks for one user append in
/// turn and the FIFO eviction of the window is preserved.
#[derive(Debug, Default)]
pub struct ModerationDetector {
    windows: DashMap<i64, MessageWindow>,
}

impl ModerationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` in the user's window and reports whether the newest `threshold`
    /// entries are identical after normalization. Every call appends, so checking the same
    /// message twice counts it twice.
    pub fn is_spam(&self, user_id: i64, message: &str, threshold: usize) -> bool {
        let mut window = self.windows.entry(user_id).or_default();
        window.push(normalize(message));
        window.tail_is_uniform(threshold)
    }

    /// See [`crate::contains_link`].
    pub fn contains_link(&self, message: &str) -> bool {
        contains_link(message)
    }

    /// See [`crate::is_exempt`].
    pub fn is_exempt(&self, member: &Member, whitelist_roles: &[String]) -> bool {
        is_exempt(member, whitelist_roles)
    }

    /// Full moderation decision for one guild message: exempt members pass untouched (their
    /// messages are not recorded), then spam is checked before links.
    pub fn check(
        &self,
        user_id: i64,
        message: &str,
        member: &Member,
        config: &AutoModConfig,
    ) -> Option<Violation> {
        if self.is_exempt(member, &config.whitelist_roles) {
            return None;
        }
        if self.is_spam(user_id, message, config.spam_threshold) {
            return Some(Violation::Spam);
        }
        if self.contains_link(message) {
            return Some(Violation::Link);
        }
        None
    }

    /// Number of messages currently held for the user.
    pub fn window_len(&self, user_id: i64) -> usize {
        self.windows.get(&user_id).map(|w| w.len()).unwrap_or(0)
    }

    /// Number of users with a window.
    pub fn tracked_users(&self) -> usize {
        self.windows.len()
    }

    /// Drops the windows of users who have not posted for at least `max_idle`. Returns how many were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| window.last_seen().elapsed() < max_idle);
        let evicted = before.saturating_sub(self.windows.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.windows.len(), "Evicted idle message windows");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_identical_messages_trigger_on_third() {
        let detector = ModerationDetector::new();
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(detector.is_spam(1, "hi", 3));
    }

    #[test]
    fn test_normalization_applies_before_comparison() {
        let detector = ModerationDetector::new();
        assert!(!detector.is_spam(1, "Buy Now", 3));
        assert!(!detector.is_spam(1, "  buy now", 3));
        assert!(detector.is_spam(1, "BUY NOW  ", 3));
    }

    #[test]
    fn test_interrupted_repeat_is_not_spam() {
        let detector = ModerationDetector::new();
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(!detector.is_spam(1, "hello", 3));
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(!detector.is_spam(1, "hi", 3));
        assert!(detector.is_spam(1, "hi", 3));
    }

    #[test]
    fn test_windows_are_per_user() {
        let detector = ModerationDetector::new();
        assert!(!detector.is_spam(1, "hi", 2));
        assert!(!detector.is_spam(2, "hi", 2));
        assert!(detector.is_spam(1, "hi", 2));
        assert_eq!(detector.tracked_users(), 2);
    }

    #[test]
    fn test_threshold_one_flags_every_message() {
        let detector = ModerationDetector::new();
        assert!(detector.is_spam(1, "anything", 1));
    }

    #[test]
    fn test_threshold_above_capacity_never_fires() {
        let detector = ModerationDetector::new();
        for _ in 0..30 {
            assert!(!detector.is_spam(1, "same", 11));
        }
        assert_eq!(detector.window_len(1), 10);
    }

    #[test]
    fn test_check_skips_exempt_members() {
        let detector = ModerationDetector::new();
        let config = AutoModConfig::default();
        let admin = Member {
            is_admin: true,
            role_names: vec![],
        };
        for _ in 0..5 {
            assert_eq!(detector.check(1, "https://spam.example", &admin, &config), None);
        }
        assert_eq!(detector.window_len(1), 0);
    }

    #[test]
    fn test_check_prefers_spam_over_link() {
        let detector = ModerationDetector::new();
        let config = AutoModConfig::default();
        let member = Member::default();
        assert_eq!(
            detector.check(1, "go to site.io", &member, &config),
            Some(Violation::Link)
        );
        assert_eq!(
            detector.check(1, "go to site.io", &member, &config),
            Some(Violation::Link)
        );
        assert_eq!(
            detector.check(1, "go to site.io", &member, &config),
            Some(Violation::Spam)
        );
        assert_eq!(detector.check(1, "good morning", &member, &config), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_drops_only_silent_users() {
        let detector = ModerationDetector::new();
        detector.is_spam(1, "early", 3);
        tokio::time::advance(Duration::from_secs(120)).await;
        detector.is_spam(2, "recent", 3);

        assert_eq!(detector.evict_idle(Duration::from_secs(60)), 1);
        assert_eq!(detector.window_len(1), 0);
        assert_eq!(detector.window_len(2), 1);
    }
}
