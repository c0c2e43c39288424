//! Donation Error Types
//!
//! Donation-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

/// Donation-specific result type alias
pub type DonationResult<T> = Result<T, DonationError>;

/// Donation-specific error variants
#[derive(Debug, Error)]
pub enum DonationError {
    /// Submission failed the donation rules
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("Donation not found")]
    NotFound,

    /// Insert failed in the store
    #[error("Failed to add donation")]
    RecordFailed(#[source] sqlx::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DonationError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DonationError::Validation(_) | DonationError::BadRequest(_) => ErrorKind::BadRequest,
            DonationError::NotFound => ErrorKind::NotFound,
            DonationError::RecordFailed(_)
            | DonationError::Database(_)
            | DonationError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            DonationError::Validation(errors) => AppError::validation(errors.clone()),
            DonationError::RecordFailed(_) => AppError::internal("Failed to add donation"),
            DonationError::Database(_) | DonationError::Internal(_) => {
                AppError::internal("Failed to load donations")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DonationError::RecordFailed(e) | DonationError::Database(e) => {
                tracing::error!(error = %e, "Donation database error");
            }
            DonationError::Internal(msg) => {
                tracing::error!(message = %msg, "Donation internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Donation error");
            }
        }
    }
}

impl IntoResponse for DonationError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(DonationError::NotFound.kind().status_code(), 404);
        assert_eq!(
            DonationError::Validation(FieldErrors::new()).kind().status_code(),
            400
        );
        assert_eq!(
            DonationError::RecordFailed(sqlx::Error::RowNotFound).kind().status_code(),
            500
        );
    }

    #[test]
    fn test_record_failure_message() {
        let app = DonationError::RecordFailed(sqlx::Error::PoolTimedOut).to_app_error();
        assert_eq!(app.message(), "Failed to add donation");
        assert_eq!(app.to_body()["error"], "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(DonationError::NotFound.to_app_error().message(), "Donation not found");
    }
}
