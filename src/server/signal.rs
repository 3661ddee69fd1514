// Signal handling module
//
// Supported signals:
// - SIGTERM: Stop accepting connections
// - SIGINT:  Stop accepting connections (Ctrl+C)

use crate::logger;

/// Resolve once the process is asked to stop
///
/// If a handler cannot be registered the error is logged and that signal is
/// simply never observed.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = terminate => logger::log_info("[SIGNAL] SIGTERM received"),
        () = ctrl_c() => logger::log_info("[SIGNAL] SIGINT received"),
    }
}

/// Resolve once the process is asked to stop
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    ctrl_c().await;
    logger::log_info("[SIGNAL] Ctrl+C received");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
}
