//! Errors reported by the file handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("missing file name")]
    MissingName,

    #[error("invalid file name `{0}`")]
    InvalidName(String),

    #[error("missing file content")]
    MissingContent,

    #[error("file exists already")]
    AlreadyExists,

    /// The file could not be opened or read.
    #[error("read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be created or written.
    #[error("write {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Client mistakes are 400; failures to change storage are 500.
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::MissingName
            | FileError::InvalidName(_)
            | FileError::MissingContent
            | FileError::Read { .. } => StatusCode::BAD_REQUEST,
            FileError::AlreadyExists | FileError::Write { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "File operation failed");
        } else {
            tracing::debug!(error = %self, "File request rejected");
        }
        response::text(status, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(FileError::MissingName.status(), StatusCode::BAD_REQUEST);
        assert_eq!(FileError::MissingContent.status(), StatusCode::BAD_REQUEST);
        assert_eq!(FileError::AlreadyExists.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let read = FileError::Read {
            name: "notes".into(),
            source: std::io::ErrorKind::NotFound.into(),
        };
        assert_eq!(read.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_messages() {
        assert_eq!(FileError::MissingName.to_string(), "missing file name");
        assert_eq!(FileError::MissingContent.to_string(), "missing file content");
        assert_eq!(FileError::AlreadyExists.to_string(), "file exists already");
    }
}
