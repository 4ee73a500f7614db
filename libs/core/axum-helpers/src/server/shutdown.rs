//! Graceful shutdown on SIGINT/SIGTERM.

use tokio::signal;
use tokio::sync::watch;
use tracing::info;

/// One-shot shutdown flag shared by the server and its cleanup task.
///
/// Cloning yields another handle to the same flag. The flag only ever goes
/// from `false` to `true`.
#[derive(Clone, Debug)]
pub struct ShutdownCoordinator {
    tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.tx.borrow()
    }

    /// Raise the flag. Returns `true` for the call that actually raised it.
    pub fn shutdown(&self) -> bool {
        let first = !self.tx.send_replace(true);
        if first {
            info!("Initiating graceful shutdown");
        }
        first
    }

    /// Completes once the flag is raised, whoever raised it.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|raised| *raised).await;
    }

    /// Completes on SIGINT/SIGTERM or a programmatic [`shutdown`](Self::shutdown),
    /// raising the flag in the first case.
    pub async fn wait_for_signal(&self) {
        tokio::select! {
            _ = termination_signal() => {
                self.shutdown();
            }
            _ = self.triggered() => {}
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain signal future for `axum::serve().with_graceful_shutdown()`.
pub async fn shutdown_signal() {
    termination_signal().await;
}

/// Ctrl+C or SIGTERM. A handler that cannot be installed is logged and never fires.
async fn termination_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
