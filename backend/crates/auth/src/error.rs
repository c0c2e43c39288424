//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// Username already exists (unique constraint)
    #[error("Username already taken")]
    UsernameTaken,

    /// Unknown username or wrong password (indistinguishable on purpose)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No session, or the session token is invalid/expired
    #[error("Unauthorized")]
    Unauthenticated,

    /// Account creation attempted without a session
    #[error("Unauthorized. Only authenticated users can create new accounts.")]
    RegistrationUnauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::RegistrationUnauthorized => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; the detail only goes to
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors.clone()),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Authentication service error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RegistrationUnauthorized => {
                tracing::warn!("Unauthenticated account creation attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
