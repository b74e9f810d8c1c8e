//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the frozen registry
//! - Resolve a request's method and path to a route entry
//! - Invoke the matched handler, or answer 404
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in registration order; first match wins
//! - Explicit `NotFound` rather than a silent default

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::response;
use crate::observability::metrics;
use crate::routing::canonical::{canonical_key, DecodedPath};
use crate::routing::handler::BoxedHandler;
use crate::routing::registry::{Registry, RouteEntry};

/// Outcome of resolving a request against the registry.
pub enum Resolution<'a, H> {
    Matched(&'a RouteEntry<H>),
    NotFound,
}

impl<'a, H> Resolution<'a, H> {
    /// The matched entry's handler, if any.
    pub fn handler(&self) -> Option<&'a H> {
        match self {
            Resolution::Matched(entry) => Some(entry.handler()),
            Resolution::NotFound => None,
        }
    }

    /// The matched entry's raw pattern, if any.
    pub fn pattern(&self) -> Option<&'a str> {
        match self {
            Resolution::Matched(entry) => Some(entry.pattern()),
            Resolution::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

impl<H> std::fmt::Debug for Resolution<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Matched(entry) => f.debug_tuple("Matched").field(&entry.pattern()).finish(),
            Resolution::NotFound => f.write_str("NotFound"),
        }
    }
}

/// Pattern router built from a populated registry.
pub struct Router<H = BoxedHandler> {
    registry: Registry<H>,
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("registry", &self.registry).finish()
    }
}

impl<H> Router<H> {
    /// Freeze `registry`; no routes can be added afterwards.
    pub fn new(registry: Registry<H>) -> Self {
        Self { registry }
    }

    /// Find the first route whose pattern is found in `"<METHOD> <PATH>"`.
    pub fn resolve(&self, method: &str, path: &str) -> Resolution<'_, H> {
        let key = canonical_key(method, path);
        match self.registry.find(&key) {
            Some(entry) => {
                tracing::trace!(key = %key, pattern = %entry.pattern(), "Route matched");
                Resolution::Matched(entry)
            }
            None => Resolution::NotFound,
        }
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }
}

impl Router<BoxedHandler> {
    /// Resolve `request` and hand it to the matched handler.
    ///
    /// The key is built from the percent-decoded path, which is also
    /// attached to the request as a [`DecodedPath`] extension.
    /// Unmatched requests get `404 Not Found`.
    pub async fn dispatch(&self, mut request: Request<Body>) -> Response {
        let start_time = Instant::now();
        let method = request.method().clone();
        let decoded = DecodedPath::decode(request.uri().path());
        request.extensions_mut().insert(decoded.clone());
        let path = decoded.as_str();

        match self.resolve(method.as_str(), path) {
            Resolution::Matched(entry) => {
                let handler = Arc::clone(entry.handler());
                let response = handler.call(request).await;
                tracing::debug!(
                    method = %method,
                    path = %path,
                    pattern = %entry.pattern(),
                    status = response.status().as_u16(),
                    "Request dispatched"
                );
                metrics::record_request(entry.pattern(), response.status().as_u16(), start_time);
                response
            }
            Resolution::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                let response = response::not_found();
                metrics::record_request(metrics::UNMATCHED_ROUTE, response.status().as_u16(), start_time);
                response
            }
        }
    }
}
