//! Integration tests for [`storage::ContextRepository`].
//!
//! Covers the bounded, chronological context contract and cross-user isolation using an
//! in-memory SQLite database, plus concurrent writers against a file database.

use std::sync::Arc;

use storage::{ContextRepository, ContextStore, CONTEXT_CAPACITY};

async fn memory_repo() -> ContextRepository {
    ContextRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

/// **Test: A user without history gets an empty context.**
#[tokio::test]
async fn test_get_context_empty_for_new_user() {
    let repo = memory_repo().await;

    let context = repo.get_context(123).await.expect("Failed to get context");

    assert!(context.is_empty());
}

/// **Test: Exchanges come back oldest first with their texts intact.**
///
/// **Setup:** Three updates for one user.
/// **Action:** `get_context(user_id)`.
/// **Expected:** Three exchanges in insertion order, timestamps non-decreasing.
#[tokio::test]
async fn test_get_context_is_chronological() {
    let repo = memory_repo().await;

    repo.update_context(1, "hello", "hi there").await.unwrap();
    repo.update_context(1, "how are you?", "great!").await.unwrap();
    repo.update_context(1, "bye", "see you").await.unwrap();

    let context = repo.get_context(1).await.unwrap();
    let messages: Vec<&str> = context.iter().map(|e| e.user_message.as_str()).collect();
    assert_eq!(messages, vec!["hello", "how are you?", "bye"]);
    assert_eq!(context[1].bot_response, "great!");
    assert!(context
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));
}

/// **Test: After N+1 updates only the last N exchanges remain.**
///
/// **Setup:** CONTEXT_CAPACITY + 1 updates for one user.
/// **Action:** `get_context(user_id)` and `count(user_id)`.
/// **Expected:** Exactly N exchanges, the first one evicted, order preserved; no extra rows kept.
#[tokio::test]
async fn test_update_context_evicts_oldest() {
    let repo = memory_repo().await;

    for i in 0..=CONTEXT_CAPACITY {
        repo.update_context(7, &format!("message {}", i), &format!("reply {}", i))
            .await
            .unwrap();
    }

    let context = repo.get_context(7).await.unwrap();
    assert_eq!(context.len(), CONTEXT_CAPACITY);
    assert_eq!(context[0].user_message, "message 1");
    assert_eq!(
        context[CONTEXT_CAPACITY - 1].user_message,
        format!("message {}", CONTEXT_CAPACITY)
    );
    assert_eq!(repo.count(7).await.unwrap(), CONTEXT_CAPACITY as i64);
}

/// **Test: Updating one user never touches another user's context.**
#[tokio::test]
async fn test_update_context_isolated_per_user() {
    let repo = memory_repo().await;

    repo.update_context(1, "from A", "to A").await.unwrap();
    for i in 0..15 {
        repo.update_context(2, &format!("from B {}", i), "to B")
            .await
            .unwrap();
    }

    let a = repo.get_context(1).await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].user_message, "from A");
    assert_eq!(repo.get_context(2).await.unwrap().len(), CONTEXT_CAPACITY);
}

/// **Test: clear_context removes only the given user's history.**
#[tokio::test]
async fn test_clear_context() {
    let repo = memory_repo().await;

    repo.update_context(1, "a", "b").await.unwrap();
    repo.update_context(1, "c", "d").await.unwrap();
    repo.update_context(2, "e", "f").await.unwrap();

    assert_eq!(repo.clear_context(1).await.unwrap(), 2);
    assert!(repo.get_context(1).await.unwrap().is_empty());
    assert_eq!(repo.get_context(2).await.unwrap().len(), 1);
}

/// **Test: Concurrent writers for one user never leave more than N rows.**
///
/// **Setup:** File database in a temp dir; 8 tasks each writing 5 exchanges for the same user.
/// **Action:** Join all tasks, then count rows.
/// **Expected:** Exactly CONTEXT_CAPACITY rows remain.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_stay_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("context.db").display());
    let repo = Arc::new(ContextRepository::new(&url).await.unwrap());

    let mut handles = Vec::new();
    for task in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..5 {
                repo.update_context(99, &format!("t{} m{}", task, i), "ok")
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.count(99).await.unwrap(), CONTEXT_CAPACITY as i64);
    assert_eq!(repo.get_context(99).await.unwrap().len(), CONTEXT_CAPACITY);
}
