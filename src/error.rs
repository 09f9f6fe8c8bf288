//! Error types and HTTP error response handling.
//!
//! Handlers and the store never recover from errors locally. Everything is
//! propagated as an [`AppError`] and turned into a JSON response exactly once,
//! by the [`IntoResponse`] implementation below.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Resource Errors**: the requested company, invoice or route is absent
/// - **Validation Errors**: missing body fields, malformed JSON or path ids
/// - **Conflict Errors**: a unique constraint would be violated
/// - **Database Errors**: any other `sqlx::Error`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No company exists with the given code.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("No such company: {0}")]
    CompanyNotFound(String),

    /// No invoice exists with the given id.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("No such invoice: {0}")]
    InvoiceNotFound(i64),

    /// No route matched the request.
    #[error("Not found")]
    RouteNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// The write would duplicate an existing unique value.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::CompanyNotFound(_) | AppError::InvoiceNotFound(_) | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wrap a database error, reporting unique violations as a conflict.
    pub fn from_write(err: sqlx::Error, conflict: impl FnOnce() -> String) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(conflict())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "message": "No such invoice: 999",
///     "status": 404
///   }
/// }
/// ```
///
/// Server-side failures are logged and reported with a generic message so
/// database details never reach the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_the_missing_key() {
        let (status, body) = render(AppError::InvoiceNotFound(999)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(body["error"]["message"], "No such invoice: 999");

        let (_, body) = render(AppError::CompanyNotFound("acme".into())).await;
        assert_eq!(body["error"]["message"], "No such company: acme");
    }

    #[tokio::test]
    async fn invalid_request_is_a_bad_request() {
        let (status, body) = render(AppError::InvalidRequest("name is required".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
        assert_eq!(body["error"]["message"], "name is required");
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let (status, body) = render(AppError::Database(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], 500);
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn non_unique_write_errors_stay_database_errors() {
        let err = AppError::from_write(sqlx::Error::RowNotFound, || "duplicate".into());
        assert!(matches!(err, AppError::Database(_)));
    }
}
