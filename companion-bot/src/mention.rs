//! Turns raw chat text into the question passed to the model.

/// Question used when the message is empty after cleanup (e.g. a bare mention).
pub const EMPTY_MESSAGE_PROMPT: &str = "Hello!";

/// Removes `<@bot_id>` / `<@!bot_id>` mentions, then a leading `prefix`, and trims. An empty
/// result becomes [`EMPTY_MESSAGE_PROMPT`].
pub fn clean_content(content: &str, bot_user_id: i64, prefix: &str) -> String {
    let stripped = content
        .replace(&format!("<@{}>", bot_user_id), "")
        .replace(&format!("<@!{}>", bot_user_id), "");
    let mut text = stripped.trim();
    if !prefix.is_empty() {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim();
        }
    }
    if text.is_empty() {
        EMPTY_MESSAGE_PROMPT.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_both_mention_forms() {
        assert_eq!(clean_content("<@42> how are you?", 42, "!"), "how are you?");
        assert_eq!(clean_content("hey <@!42>", 42, "!"), "hey");
    }

    #[test]
    fn test_keeps_other_mentions() {
        assert_eq!(clean_content("<@7> is nice", 42, "!"), "<@7> is nice");
    }

    #[test]
    fn test_strips_prefix_after_mention() {
        assert_eq!(clean_content("<@42> !tell me a joke", 42, "!"), "tell me a joke");
        assert_eq!(clean_content("!  hi", 42, "!"), "hi");
    }

    #[test]
    fn test_prefix_only_stripped_at_start() {
        assert_eq!(clean_content("wow!", 42, "!"), "wow!");
    }

    #[test]
    fn test_empty_becomes_greeting() {
        assert_eq!(clean_content("<@42>", 42, "!"), EMPTY_MESSAGE_PROMPT);
        assert_eq!(clean_content("  ! ", 42, "!"), EMPTY_MESSAGE_PROMPT);
        assert_eq!(clean_content("", 42, ""), EMPTY_MESSAGE_PROMPT);
    }
}
