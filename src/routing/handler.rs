//! Handler capability invoked by the dispatcher.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

/// Consumes a request and produces the full response for it.
///
/// The dispatcher does not inspect the response; status and body are
/// entirely up to the handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        Box::pin(self(request))
    }
}

/// Shared, type-erased handler as stored in the registry.
pub type BoxedHandler = Arc<dyn Handler>;
