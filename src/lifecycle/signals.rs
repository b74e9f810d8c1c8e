//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Translate signals into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Non-unix targets only listen for Ctrl+C

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::Shutdown;

/// Wait for the first termination signal; returns its name.
#[cfg(unix)]
pub async fn termination_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => Ok("SIGTERM"),
        _ = sigint.recv() => Ok("SIGINT"),
    }
}

/// Wait for Ctrl+C; returns its name.
#[cfg(not(unix))]
pub async fn termination_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

/// Spawn a task that triggers `shutdown` on the first termination signal.
pub fn spawn_signal_listener(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        match termination_signal().await {
            Ok(name) => tracing::info!(signal = name, "Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers, shutting down"),
        }
        shutdown.trigger();
    })
}
