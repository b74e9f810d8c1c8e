//! Plain-text responses shared by the dispatcher and the handlers.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Body written for requests that match no route.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `text/plain` response with the given status and body.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    let mut response = (status, body.into()).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    response
}

pub fn not_found() -> Response {
    let mut response = text(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

pub fn service_unavailable() -> Response {
    text(StatusCode::SERVICE_UNAVAILABLE, "server is shutting down")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_response() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let body = axum::body::to_bytes(not_found().into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"404 page not found\n");
    }
}
