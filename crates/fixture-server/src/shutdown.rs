//! Graceful shutdown via `CancellationToken`.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Signals the server task to stop accepting connections and waits for it to
/// drain.
#[derive(Debug, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// Create a coordinator that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled when shutdown begins.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Begin shutdown. Repeated calls are no-ops.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has begun.
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Begin shutdown and wait up to `timeout` for `handle` to finish.
    ///
    /// Returns `false` and aborts the task if it is still running when the
    /// timeout elapses.
    pub async fn drain(&self, handle: JoinHandle<()>, timeout: Duration) -> bool {
        self.shutdown();
        info!(timeout_secs = timeout.as_secs(), "draining in-flight requests");

        let abort = handle.abort_handle();
        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "server task ended abnormally");
                true
            }
            Err(_) => {
                warn!(?timeout, "shutdown timed out, aborting server task");
                abort.abort();
                false
            }
        }
    }
}
