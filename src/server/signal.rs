// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

fn request_shutdown(state: &AppState, signal: &str) {
    logger::log_info(&format!("{signal} received, shutting down"));
    // notify_one stores a permit, so a loop that is not yet waiting still sees it
    state.shutdown.notify_one();
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that waits for SIGTERM or SIGINT and then
/// notifies `state.shutdown`.
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => request_shutdown(&state, "SIGTERM"),
            _ = sigint.recv() => request_shutdown(&state, "SIGINT"),
        }
    });
    Ok(())
}

/// Fallback for non-Unix targets: only Ctrl+C is supported
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            request_shutdown(&state, "Ctrl+C");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_request_shutdown_wakes_waiter() {
        let cfg = Config::load_from("does-not-exist/ezupload-test-config").unwrap();
        let state = Arc::new(AppState::with_work_dir(&cfg, std::env::temp_dir()));

        request_shutdown(&state, "TEST");
        tokio::time::timeout(std::time::Duration::from_secs(1), state.shutdown.notified())
            .await
            .unwrap();
    }
}
