//! Fixed-capacity FIFO buffer of a user's recent message texts.

use std::collections::VecDeque;

use tokio::time::Instant;

/// Number of recent messages kept per user.
pub const WINDOW_CAPACITY: usize = 10;

/// Case-folds and trims a message so repeats compare equal regardless of case and padding.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Last [`WINDOW_CAPACITY`] normalized messages of one user, oldest first.
#[derive(Debug, Clone)]
pub struct MessageWindow {
    messages: VecDeque<String>,
    last_seen: Instant,
}

impl MessageWindow {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(WINDOW_CAPACITY),
            last_seen: Instant::now(),
        }
    }

    /// Appends an already-normalized text, evicting the oldest entry when full.
    pub fn push(&mut self, text: String) {
        if self.messages.len() == WINDOW_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(text);
        self.last_seen = Instant::now();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True when the window holds at least `n` entries and the newest `n` are identical.
    /// `n == 0` is never uniform.
    pub fn tail_is_uniform(&self, n: usize) -> bool {
        if n == 0 || self.messages.len() < n {
            return false;
        }
        let mut tail = self.messages.iter().skip(self.messages.len() - n);
        match tail.next() {
            Some(first) => tail.all(|m| m == first),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Time of the last push (or creation).
    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }
}

impl Default for MessageWindow {
    fn default() -> Self {
        Self::new()
    }
}
