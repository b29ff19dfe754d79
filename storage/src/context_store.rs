//! Rolling per-user chat context contract.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::Exchange;

/// Exchanges kept per user.
pub const CONTEXT_CAPACITY: usize = 10;

/// Bounded per-user history of exchanges.
///
/// Implementations append and truncate in one atomic step, so a user never has more than
/// [`CONTEXT_CAPACITY`] exchanges stored, whatever the interleaving of concurrent writers.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// The user's stored exchanges, oldest first; empty when the user has no history.
    async fn get_context(&self, user_id: i64) -> Result<Vec<Exchange>, StorageError>;

    /// Records a new exchange stamped now and drops everything older than the newest
    /// [`CONTEXT_CAPACITY`].
    async fn update_context(
        &self,
        user_id: i64,
        user_message: &str,
        bot_response: &str,
    ) -> Result<(), StorageError>;

    /// Deletes the user's history. Returns how many exchanges were removed.
    async fn clear_context(&self, user_id: i64) -> Result<u64, StorageError>;
}
