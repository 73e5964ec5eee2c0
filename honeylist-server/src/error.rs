//! Error types for honeylist-server
//!
//! Handlers return [`ServerResult`]; errors become plain-text responses.
//! Server-side faults are logged and answered with a generic body.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::uploads::UploadError;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Listing not found")]
    NotFound { id: i64 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Malformed form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartRejection> for ServerError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound { id } => {
                tracing::debug!(id, "listing not found");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Multipart(e) => (e.status(), self.to_string()),
            ServerError::Upload(UploadError::TooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            ServerError::Upload(UploadError::Io(e)) => {
                tracing::error!("Upload write failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            ServerError::Upload(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_plain_text_404() {
        let response = ServerError::NotFound { id: 7 }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Listing not found");
    }

    #[tokio::test]
    async fn rejected_upload_is_400() {
        let err = ServerError::from(UploadError::UnsupportedType {
            filename: "x.exe".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        let err = ServerError::from(UploadError::TooLarge {
            filename: "x.jpg".into(),
            size: 10,
            max: 1,
        });
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn database_error_hides_detail() {
        let response = ServerError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "an internal error occurred");
    }
}
