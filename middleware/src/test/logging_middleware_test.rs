//! Unit tests for LoggingMiddleware.

use dbot_core::testing::{direct_message, guild_message, member_with_roles};
use dbot_core::{HandlerResponse, Middleware};

use crate::LoggingMiddleware;

#[tokio::test]
async fn test_logging_middleware_before_continues() {
    let mw = LoggingMiddleware;
    let dm = direct_message(1, "hello");
    let guild = guild_message(1, 9, 200, "hello", member_with_roles(&[]));

    assert!(mw.before(&dm).await.unwrap());
    assert!(mw.before(&guild).await.unwrap());
}

#[tokio::test]
async fn test_logging_middleware_after_ok() {
    let mw = LoggingMiddleware;
    let msg = direct_message(1, "hello");
    let response = HandlerResponse::Reply("hi".to_string());
    let result: dbot_core::Result<()> = mw.after(&msg, &response).await;
    assert!(result.is_ok());
}
