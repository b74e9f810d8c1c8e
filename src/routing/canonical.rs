//! Canonical lookup keys.

use axum::http::request::Parts;
use percent_encoding::percent_decode_str;

/// Build the key patterns are matched against: `"<METHOD> <PATH>"`.
///
/// No normalization is applied. The path never carries the query string.
pub fn canonical_key(method: &str, path: &str) -> String {
    let mut key = String::with_capacity(method.len() + 1 + path.len());
    key.push_str(method);
    key.push(' ');
    key.push_str(path);
    key
}

/// Request path with percent-escapes decoded.
///
/// The dispatcher matches on this and attaches it to the request as an
/// extension, so handlers see the same path the route was chosen by.
/// An encoded `/` (`%2F`) decodes to a real separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath(String);

impl DecodedPath {
    /// Decode `raw`; byte sequences that are not UTF-8 become U+FFFD.
    pub fn decode(raw: &str) -> Self {
        Self(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }

    /// The path attached by the dispatcher, or one decoded from the URI.
    pub fn of(parts: &Parts) -> Self {
        parts
            .extensions
            .get::<DecodedPath>()
            .cloned()
            .unwrap_or_else(|| Self::decode(parts.uri.path()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
