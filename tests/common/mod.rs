//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use pattern_router::config::ServerConfig;
use pattern_router::lifecycle::{startup, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral port with its own storage root.
pub struct TestServer {
    pub addr: SocketAddr,
    pub root: TempDir,
    pub shutdown: Shutdown,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start the server with default config apart from the storage root.
pub async fn start_server() -> TestServer {
    start_server_with(|_| {}).await
}

/// Start the server after letting `configure` adjust the config.
pub async fn start_server_with<F>(configure: F) -> TestServer
where
    F: FnOnce(&mut ServerConfig),
{
    let root = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.storage.root = root.path().to_path_buf();
    config.timeouts.shutdown_secs = 1;
    configure(&mut config);

    let router = startup::build_router(&config).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        let _ = startup::serve(&config, router, listener, &server_shutdown).await;
    });

    TestServer {
        addr,
        root,
        shutdown,
        handle,
    }
}

/// A client that does not reuse connections between requests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
