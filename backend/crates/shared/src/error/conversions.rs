//! Error conversions - From implementations for common error types
//!
//! Postgres error-code helpers and the HTTP rendering of [`AppError`].

use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL `unique_violation`
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Whether a sqlx error is a unique-constraint violation
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_body())).into_response()
    }
}

/// Public `error` text for every 5xx body
pub const INTERNAL_ERROR_TEXT: &str = "Internal server error";

impl AppError {
    /// JSON body for this error
    ///
    /// - always `message`
    /// - `errors` (field -> messages) for validation failures
    /// - `error` (always [`INTERNAL_ERROR_TEXT`]) for server errors; internal
    ///   details stay in the logs
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({ "message": self.message() });

        if let Some(errors) = self.field_errors() {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }

        if self.is_server_error() {
            body["error"] = serde_json::Value::from(INTERNAL_ERROR_TEXT);
        }

        body
    }
}
