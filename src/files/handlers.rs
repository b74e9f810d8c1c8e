//! Read, create and update handlers.
//!
//! Each handler takes the file name from the request path and, for writes,
//! the content from the `text` query parameter.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::files::error::FileError;
use crate::files::store::{FileName, FileStore};
use crate::http::request::RequestIdExt;
use crate::http::response;
use crate::routing::DecodedPath;

/// Extract the `text` query parameter, percent-decoded.
fn text_param(uri: &Uri) -> Result<String, FileError> {
    uri.query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "text")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|text| !text.is_empty())
        .ok_or(FileError::MissingContent)
}

/// `GET /read/<name>`: the file's lines.
pub async fn read_file(store: Arc<FileStore>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let result = async {
        let name = FileName::from_request_path(DecodedPath::of(&parts).as_str())?;
        store.read(&name).await
    }
    .await;

    match result {
        Ok(text) => response::text(StatusCode::OK, text),
        Err(e) => e.into_response(),
    }
}

/// `POST /add/<name>?text=...`: create a new file.
pub async fn create_file(store: Arc<FileStore>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let result = async {
        let name = FileName::from_request_path(DecodedPath::of(&parts).as_str())?;
        let text = text_param(&parts.uri)?;
        store.create(&name, &text).await?;
        Ok::<_, FileError>(name)
    }
    .await;

    match result {
        Ok(name) => {
            tracing::info!(request_id = %parts.request_id(), file = %name, "File created");
            response::text(StatusCode::OK, format!("{name} created successfully"))
        }
        Err(e) => e.into_response(),
    }
}

/// `PUT|PATCH /update/<name>?text=...`: append to a file.
pub async fn update_file(store: Arc<FileStore>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let result = async {
        let name = FileName::from_request_path(DecodedPath::of(&parts).as_str())?;
        let text = text_param(&parts.uri)?;
        store.append(&name, &text).await?;
        Ok::<_, FileError>(name)
    }
    .await;

    match result {
        Ok(name) => {
            tracing::info!(request_id = %parts.request_id(), file = %name, "File updated");
            response::text(StatusCode::OK, format!("{name} updated successfully"))
        }
        Err(e) => e.into_response(),
    }
}
