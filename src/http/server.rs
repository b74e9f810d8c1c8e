//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, request ID, timeout, in-flight limit)
//! - Serve on a listener until shutdown
//! - Hand every request to the pattern router
//!
//! # Design Decisions
//! - Axum does no routing of its own; the pattern router sees every request
//! - The pattern router is shared read-only via `Arc`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::net::{limit_in_flight, InFlightLimit};
use crate::routing::Router as PatternRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PatternRouter>,
}

/// HTTP server fronting the pattern router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig, pattern_router: Arc<PatternRouter>) -> Self {
        let limit = InFlightLimit::new(config.listener.max_connections);
        let state = AppState {
            router: pattern_router,
        };
        let router = Self::build_router(config, state, limit);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState, limit: InFlightLimit) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            request_id = %request.request_id(),
                            method = %request.method(),
                            path = %request.uri().path(),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(middleware::from_fn_with_state(limit, limit_in_flight)),
            )
    }

    /// The axum router, for serving in-process (tests, embedding).
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: everything goes through the pattern router.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.router.dispatch(request).await
}
