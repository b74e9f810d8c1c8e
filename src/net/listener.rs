//! TCP listener and in-flight request limit.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Enforce `max_connections` via semaphore (backpressure)
//!
//! # Design Decisions
//! - Requests over the limit wait for a slot rather than being refused
//! - The permit is held for the whole request, including the handler

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use crate::config::ListenerConfig;
use crate::http::response;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured address is not a socket address.
    #[error("invalid bind address `{address}`: {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let address: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|source| ListenerError::Address {
            address: config.bind_address.clone(),
            source,
        })?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind { address, source })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(address),
        max_connections = config.max_connections,
        "Listener bound"
    );

    Ok(listener)
}

/// Shared limit on requests being served at once.
#[derive(Debug, Clone)]
pub struct InFlightLimit {
    permits: Arc<Semaphore>,
    max: usize,
}

impl InFlightLimit {
    /// `max` is clamped to what a semaphore can hold.
    pub fn new(max: usize) -> Self {
        let max = max.min(Semaphore::MAX_PERMITS);
        Self {
            permits: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Requests currently being served.
    pub fn in_flight(&self) -> usize {
        self.max - self.permits.available_permits()
    }
}

/// Middleware holding an [`InFlightLimit`] permit for the lifetime of each request.
pub async fn limit_in_flight(
    State(limit): State<InFlightLimit>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Ok(_permit) = limit.permits.acquire().await else {
        return response::service_unavailable();
    };

    tracing::trace!(
        in_flight = limit.in_flight(),
        max = limit.max,
        "Request admitted"
    );

    next.run(request).await
}
