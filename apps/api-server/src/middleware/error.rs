//! Error handling - maps failures to `{error, details?}` JSON bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use skillswap_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
///
/// One variant per entry of the error taxonomy: Unauthorized, Forbidden,
/// NotFound, validation failure (BadRequest), uniqueness conflict, and the
/// catch-all store/runtime failure (Internal).
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(msg) => ErrorResponse::new(msg.clone()),
            AppError::BadRequest(msg) => ErrorResponse::new(msg.clone()),
            AppError::Unauthorized => ErrorResponse::new("Unauthorized"),
            AppError::Forbidden(msg) => ErrorResponse::new(msg.clone()),
            AppError::Conflict(msg) => ErrorResponse::new(msg.clone()),
            AppError::Internal(msg) => {
                // The diagnostic stays server-side; the client sees only a
                // generic failure.
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new("Internal server error")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<skillswap_core::error::RepoError> for AppError {
    fn from(err: skillswap_core::error::RepoError) -> Self {
        use skillswap_core::error::RepoError;
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<skillswap_core::error::DomainError> for AppError {
    fn from(err: skillswap_core::error::DomainError) -> Self {
        use skillswap_core::error::DomainError;
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Forbidden => AppError::Forbidden("Not the owner".to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
