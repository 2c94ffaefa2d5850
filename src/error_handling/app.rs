//! HTTP-facing error type.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use thiserror::Error;

use super::types::StoreError;

/// Errors returned by request handlers.
///
/// Each variant maps to one status code. Internal errors are logged with their
/// detail and answered with a generic body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid input (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing credentials or bearer token (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Bearer token present but invalid or expired (403).
    #[error("{0}")]
    Forbidden(String),

    /// The addressed bookmark or message does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Hashing, database or file I/O failure (500).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ParentNotFound(id) => {
                AppError::NotFound(format!("Parent message {id} not found"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Any unusable JSON body is a client error: wrong field types, invalid
/// syntax and a missing `application/json` content type alike.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Internal(detail) => {
                error!("Request failed: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parent_not_found_maps_to_404() {
        let err: AppError = StoreError::ParentNotFound(42).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_io_failure_maps_to_500() {
        let err: AppError = StoreError::Io {
            path: "bookmarks.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_detail_not_sent_to_client() {
        let response = AppError::Internal("disk on fire at /var/data".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = AppError::BadRequest("URL is required".into());
        assert_eq!(err.to_string(), "URL is required");
    }
}
