//! OS signal handling.
//!
//! - SIGINT (Ctrl+C) / SIGTERM → graceful shutdown
//! - SIGHUP → rebuild the route table

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::Shutdown;
use crate::routing::watcher::rebuild_and_publish;
use crate::routing::{RouteTable, RouteTableBuilder};

/// Wait for Ctrl+C or SIGTERM.
pub async fn wait_for_termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Trigger `shutdown` once a termination signal arrives.
pub fn spawn_shutdown_on_signal(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_termination().await;
        let listeners = shutdown.trigger();
        tracing::info!(listeners, "Termination signal received, shutting down");
    })
}

/// Rebuild and publish the route table on every SIGHUP.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(
    builder: RouteTableBuilder,
    tx: mpsc::UnboundedSender<RouteTable>,
) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, reloading routes");
            rebuild_and_publish(&builder, &tx, "sighup");
        }
    }))
}
