use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::detector::ModerationDetector;

/// Spawns a background task that periodically drops the windows of users idle for `max_idle`.
/// Abort the returned handle to stop it.
pub fn spawn_window_maintenance(
    detector: Arc<ModerationDetector>,
    every: Duration,
    max_idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = detector.evict_idle(max_idle);
            info!(
                evicted,
                tracked_users = detector.tracked_users(),
                "Message window maintenance done"
            );
        }
    })
}
