//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: handler before/after order, handler before stopping the chain, Reply stopping the chain
//! and being passed to handler after, middleware before stopping the chain (the moderation path),
//! and middleware after running in reverse order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dbot_core::testing::direct_message;
use dbot_core::{Handler, HandlerResponse, Message, Middleware};
use handler_chain::HandlerChain;

/// **Test: Handler before and after run; handle runs once.**
///
/// **Setup:** One handler counting before/after, one handler counting handle.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** before_count=1, handle_count=1, after_count=1; response is Continue.
#[tokio::test]
async fn test_handler_chain_with_handler() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestBeforeAfterHandler {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&direct_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Handler before returns false stops the chain; handle is not run.**
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&direct_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Handler returns Reply; chain stops and Reply is passed to handler after.**
///
/// **Setup:** A capturing handler, a Reply handler, then a counting handler.
/// **Expected:** result is Reply; the counting handler never runs; after sees the reply text.
#[tokio::test]
async fn test_handler_reply_stops_chain_and_passes_to_after() {
    struct ReplyHandler;

    #[async_trait]
    impl Handler for ReplyHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply("Hi there!".to_string()))
        }
    }

    struct CaptureResponseHandler {
        seen: Arc<Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait]
    impl Handler for CaptureResponseHandler {
        async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponseHandler { seen: seen.clone() }))
        .add_handler(Arc::new(ReplyHandler))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&direct_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("Hi there!".to_string()));
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("Hi there!".to_string()))
    );
}

/// **Test: Middleware before returning false stops everything after it.**
///
/// **Setup:** A middleware that flags the message, a counting handler.
/// **Expected:** Stop; no handler before/handle ran; no middleware after ran.
#[tokio::test]
async fn test_middleware_before_false_stops_chain() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(OrderMiddleware {
            name: "flagging",
            allow: false,
            order: order.clone(),
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&direct_message(1, "spam")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(*order.lock().unwrap(), vec!["before_flagging"]);
}

/// **Test: Phases run in order: middleware before, handler before, handler after (reverse), middleware after (reverse).**
#[tokio::test]
async fn test_phases_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(OrderMiddleware {
            name: "outer",
            allow: true,
            order: order.clone(),
        }))
        .add_middleware(Arc::new(OrderMiddleware {
            name: "inner",
            allow: true,
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&direct_message(1, "test")).await.unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec![
            "before_outer",
            "before_inner",
            "before_first",
            "before_second",
            "after_second",
            "after_first",
            "after_inner",
            "after_outer",
        ]
    );
}

/// **Test: An empty chain continues.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&direct_message(1, "test")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

// --- Helpers used by tests ---

struct TestBeforeAfterHandler {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for TestBeforeAfterHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestHandler {
    handle_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for TestHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

struct OrderHandler {
    name: &'static str,
    order: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Handler for OrderHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.order.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.order.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}

struct OrderMiddleware {
    name: &'static str,
    allow: bool,
    order: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Middleware for OrderMiddleware {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.order.lock().unwrap().push(format!("before_{}", self.name));
        Ok(self.allow)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.order.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}
