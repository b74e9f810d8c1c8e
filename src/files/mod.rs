//! File service: the handlers behind the registered routes.
//!
//! # Routes
//! ```text
//! GET /read/<name>                      → read_file
//! POST /add/<name>?text=...             → create_file
//! PUT|PATCH /update/<name>?text=...     → update_file
//! ```

pub mod error;
pub mod handlers;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::routing::{BoxedHandler, PatternError, Registry};

pub use error::FileError;
pub use store::{FileName, FileStore};

pub const READ_PATTERN: &str = "GET /read";
pub const CREATE_PATTERN: &str = "POST /add(/?[A-Za-z0-9]*)?";
pub const UPDATE_PATTERN: &str = "(PATCH|PUT) /update(/?[A-Za-z0-9]*)?";

/// Register the read, create and update routes, in that order.
pub fn register_routes(
    registry: &mut Registry<BoxedHandler>,
    store: Arc<FileStore>,
) -> Result<(), PatternError> {
    registry.add(READ_PATTERN, bind_store(Arc::clone(&store), handlers::read_file))?;
    registry.add(CREATE_PATTERN, bind_store(Arc::clone(&store), handlers::create_file))?;
    registry.add(UPDATE_PATTERN, bind_store(store, handlers::update_file))?;
    Ok(())
}

fn bind_store<F, Fut>(store: Arc<FileStore>, handler: F) -> BoxedHandler
where
    F: Fn(Arc<FileStore>, Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |request: Request<Body>| handler(Arc::clone(&store), request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_routes_order() {
        let mut registry = Registry::new();
        register_routes(&mut registry, Arc::new(FileStore::new("unused", 0o666, 0o600))).unwrap();

        let patterns: Vec<_> = registry.patterns().collect();
        assert_eq!(patterns, vec![READ_PATTERN, CREATE_PATTERN, UPDATE_PATTERN]);
    }
}
