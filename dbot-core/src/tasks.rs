//! Supervised background work (context writes, warning cleanup, reactions).
//!
//! Tasks are tracked so shutdown can wait for them; a task's error is logged, never dropped.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

/// Cloneable handle to the process-wide group of detached tasks.
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns `fut` on the runtime. The caller does not wait; a returned error is logged with `name`.
    pub fn spawn<F, E>(&self, name: &'static str, fut: F)
    where
        F: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        self.tracker.spawn(async move {
            match fut.await {
                Ok(()) => debug!(task = name, "Background task finished"),
                Err(e) => error!(task = name, error = %e, "Background task failed"),
            }
        });
    }

    /// Number of tasks still running.
    pub fn len(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Waits for every task spawned so far to finish, up to `grace`. Returns false on timeout.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        info!(pending = self.tracker.len(), "Waiting for background tasks");
        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => true,
            Err(_) => {
                warn!(
                    pending = self.tracker.len(),
                    grace_secs = grace.as_secs(),
                    "Background tasks still running at shutdown"
                );
                false
            }
        }
    }
}
