//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use blogpost_core::DomainError;
use blogpost_core::error::RepoError;
use blogpost_core::ports::AuthError;
use blogpost_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation errors: {0:?}")]
    Validation(Vec<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.join(", "))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{entity_type} {key} not found"))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => {
                tracing::debug!("Constraint violation: {}", msg);
                AppError::Conflict("Resource conflicts with existing data".to_string())
            }
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

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::MissingAuth => AppError::Unauthorized,
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Render malformed JSON bodies as problem details instead of plain text.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
