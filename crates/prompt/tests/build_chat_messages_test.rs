//! Unit tests for `prompt::build_chat_messages` and `prompt::truncate_chars`.
//!
//! External interactions: none (pure function tests).

use prompt::{
    build_chat_messages, truncate_chars, ChatMessage, MessageRole, HISTORY_TURNS, MAX_REPLY_CHARS,
};

/// **Test: Without history the list is just the current message.**
#[test]
fn build_without_history() {
    let messages = build_chat_messages(Vec::<(&str, &str)>::new(), "hello");
    assert_eq!(messages, vec![ChatMessage::user("hello")]);
}

/// **Test: Each exchange becomes a User turn followed by an Assistant turn.**
#[test]
fn build_alternates_roles() {
    let history = vec![("hi", "hey there 💖"), ("how are you?", "great!")];
    let messages = build_chat_messages(history, "tell me a joke");

    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
        ]
    );
    assert_eq!(messages[1].content, "hey there 💖");
    assert_eq!(messages[4].content, "tell me a joke");
}

/// **Test: Only the newest HISTORY_TURNS exchanges are replayed, oldest first.**
///
/// **Setup:** Ten stored exchanges q0..q9.
/// **Expected:** q7, q8, q9 then the current message.
#[test]
fn build_keeps_last_turns() {
    let history: Vec<(String, String)> = (0..10)
        .map(|i| (format!("q{}", i), format!("a{}", i)))
        .collect();
    let messages = build_chat_messages(history, "now");

    assert_eq!(messages.len(), HISTORY_TURNS * 2 + 1);
    assert_eq!(messages[0], ChatMessage::user("q7"));
    assert_eq!(messages[5], ChatMessage::assistant("a9"));
    assert_eq!(messages[6], ChatMessage::user("now"));
}

/// **Test: truncate_chars counts characters, not bytes.**
#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate_chars("hello", 10), "hello");
    assert_eq!(truncate_chars("hello", 2), "he");
    assert_eq!(truncate_chars("🌸🌸🌸", 2), "🌸🌸");
    assert_eq!(truncate_chars("", 3), "");

    let long = "x".repeat(MAX_REPLY_CHARS + 50);
    assert_eq!(truncate_chars(&long, MAX_REPLY_CHARS).len(), MAX_REPLY_CHARS);
}
