//! Startup orchestration.
//!
//! # Responsibilities
//! - Prepare the storage root
//! - Populate the route registry and freeze it into a router
//! - Bind the listener and begin accepting traffic
//! - Bound the drain after shutdown is triggered
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are registered before the listener binds (traffic only when ready)
//! - Shutdown has timeout: in-flight requests are abandoned after the deadline

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::files::{self, FileStore};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::{wait, Shutdown};
use crate::net::{self, ListenerError};
use crate::routing::{BoxedHandler, PatternError, Registry, Router};

/// Error type for startup and serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to prepare storage root {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Route(#[from] PatternError),
    #[error(transparent)]
    Bind(#[from] ListenerError),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the frozen router with the file routes registered.
pub async fn build_router(config: &ServerConfig) -> Result<Arc<Router>, StartupError> {
    let store = Arc::new(FileStore::from_config(&config.storage));
    store
        .ensure_root()
        .await
        .map_err(|source| StartupError::Storage {
            path: store.root().display().to_string(),
            source,
        })?;

    let mut registry: Registry<BoxedHandler> = Registry::with_policy(config.routing.invalid_pattern);
    files::register_routes(&mut registry, store)?;

    tracing::info!(
        routes = registry.len(),
        patterns = ?registry.patterns().collect::<Vec<_>>(),
        "Routes registered"
    );

    Ok(Arc::new(Router::new(registry)))
}

/// Bind the configured address and serve until `shutdown` fires.
pub async fn run(config: &ServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let router = build_router(config).await?;
    let listener = net::bind(&config.listener).await?;
    serve(config, router, listener, shutdown).await
}

/// Serve `router` on an already bound listener.
///
/// Once `shutdown` fires, in-flight requests get `timeouts.shutdown_secs`
/// to finish before the server gives up on them.
pub async fn serve(
    config: &ServerConfig,
    router: Arc<Router>,
    listener: TcpListener,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let server = HttpServer::new(config, router).run(listener, shutdown.subscribe());
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map_err(StartupError::Serve),
        _ = wait(shutdown.subscribe()) => {}
    }

    let grace = Duration::from_secs(config.timeouts.shutdown_secs);
    tracing::info!(grace_secs = grace.as_secs(), "Draining in-flight requests");

    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map_err(StartupError::Serve),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Drain deadline reached, abandoning in-flight requests");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::InvalidPatternPolicy;

    fn config_with_root(root: &std::path::Path) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.storage.root = root.join("files");
        config
    }

    #[tokio::test]
    async fn test_build_router_creates_root_and_registers_routes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_root(dir.path());

        let router = build_router(&config).await.unwrap();
        assert!(dir.path().join("files").is_dir());
        assert_eq!(router.registry().len(), 3);
        assert!(!router.resolve("GET", "/read/notes").is_not_found());
        assert!(router.resolve("DELETE", "/read/notes").is_not_found());
    }

    #[tokio::test]
    async fn test_build_router_with_reject_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_root(dir.path());
        config.routing.invalid_pattern = InvalidPatternPolicy::Reject;

        // The built-in patterns all compile.
        assert!(build_router(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_returns_when_triggered_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_root(dir.path());

        let router = build_router(&config).await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            serve(&config, router, listener, &shutdown),
        )
        .await
        .expect("early shutdown was lost");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_root(dir.path());
        config.timeouts.shutdown_secs = 1;

        let router = build_router(&config).await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = Shutdown::new();

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.trigger();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve(&config, router, listener, &shutdown),
        )
        .await
        .expect("server did not stop");
        assert!(result.is_ok());
    }
}
