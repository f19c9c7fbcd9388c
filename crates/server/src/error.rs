//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! each failure to a status code and a safe message, capturing unexpected
//! failures in Sentry. Internal detail never reaches the response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use cornershop_core::WorkflowError;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::documents::DocumentError;

/// Application-level error returned by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain workflow rejection.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Registration or login failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Relational repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Document vault failure.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Malformed request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and client-safe message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Workflow(err) => workflow_status(err),
            Self::Auth(err) => auth_status(err),
            Self::Repository(err) => repository_status(err),
            Self::Document(err) => document_status(err),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_owned(),
            ),
        }
    }

    /// Whether this error is worth a Sentry event.
    fn is_unexpected(&self) -> bool {
        match self {
            Self::Workflow(WorkflowError::Storage(_)) | Self::Internal(_) => true,
            Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash(_)) => true,
            Self::Repository(err) => !matches!(err, RepositoryError::NotFound),
            Self::Document(DocumentError::Io(_)) => true,
            _ => false,
        }
    }
}

fn workflow_status(err: &WorkflowError) -> (StatusCode, String) {
    match err {
        WorkflowError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        WorkflowError::InvalidQuantity => (
            StatusCode::BAD_REQUEST,
            "quantity must be a positive integer".to_owned(),
        ),
        WorkflowError::ProductNotFound => (StatusCode::NOT_FOUND, "product not found".to_owned()),
        WorkflowError::CustomerNotFound => {
            (StatusCode::NOT_FOUND, "customer not found".to_owned())
        }
        WorkflowError::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
        WorkflowError::Unauthorized => (StatusCode::FORBIDDEN, "forbidden".to_owned()),
        WorkflowError::ConcurrencyConflict => (
            StatusCode::CONFLICT,
            "the record was modified concurrently, retry with fresh data".to_owned(),
        ),
        WorkflowError::Storage(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "storage temporarily unavailable".to_owned(),
        ),
    }
}

fn auth_status(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "invalid credentials".to_owned())
        }
        AuthError::UserAlreadyExists => (StatusCode::CONFLICT, "username already taken".to_owned()),
        AuthError::WeakPassword(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        AuthError::Repository(_) | AuthError::PasswordHash(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_owned(),
        ),
    }
}

fn repository_status(err: &RepositoryError) -> (StatusCode, String) {
    match err {
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
        RepositoryError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_owned(),
        ),
    }
}

fn document_status(err: &DocumentError) -> (StatusCode, String) {
    match err {
        DocumentError::NotFound => (StatusCode::NOT_FOUND, "document not found".to_owned()),
        DocumentError::InvalidName => (StatusCode::BAD_REQUEST, "invalid document name".to_owned()),
        DocumentError::Io(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_owned(),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if self.is_unexpected() {
            error!(error = %self, status = %status, "request failed unexpectedly");
            sentry::capture_error(&self);
        } else {
            warn!(error = %self, status = %status, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
