//! Error handling - every failure leaves as the JSON envelope.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use packblog_core::ports::AssetError;
use packblog_core::{DomainError, RepoError};
use packblog_shared::ApiResponse;

const GENERIC_INTERNAL: &str = "Internal server error";

/// Application-level error type rendered as `{success: false, error, message?}`.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// `error` is the operation-level text shown to the client; `detail`
    /// is the underlying cause, passed through in `message`.
    Internal { error: String, detail: String },
}

impl AppError {
    pub fn internal(detail: impl fmt::Display) -> Self {
        AppError::Internal {
            error: GENERIC_INTERNAL.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Name the operation that failed. Only internal errors are relabelled.
    pub fn with_context(self, operation: &str) -> Self {
        match self {
            AppError::Internal { detail, .. } => AppError::Internal {
                error: operation.to_string(),
                detail,
            },
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal { error, detail } => write!(f, "{}: {}", error, detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ApiResponse::error(msg, None),
            AppError::Internal { error, detail } => {
                tracing::error!(error = %error, detail = %detail, "Request failed");
                ApiResponse::error(error, Some(detail.clone()))
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Repository(e) => e.into(),
            DomainError::Asset(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            other => AppError::internal(other),
        }
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::InvalidImage(_) => {
                AppError::BadRequest("Cover image must be a valid image file".to_string())
            }
            other => AppError::internal(other),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Attach the operation name to a failing result, e.g.
/// `service.create(..).await.context("Failed to create blog")?`.
pub trait ErrorContext<T> {
    fn context(self, operation: &str) -> AppResult<T>;
}

impl<T, E: Into<AppError>> ErrorContext<T> for Result<T, E> {
    fn context(self, operation: &str) -> AppResult<T> {
        self.map_err(|e| e.into().with_context(operation))
    }
}
