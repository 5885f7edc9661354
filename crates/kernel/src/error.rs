//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::listing::ListingError;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("{0}")]
    BadRequest(String),
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Store(e) => AppError::Internal(e),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Store failures are logged in full but never echoed to the client.
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal server error");
                "internal server error".to_string()
            }
            AppError::BadRequest(m) => m.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::listing::CursorError;
    use crate::models::ProductValidationError;

    #[test]
    fn client_errors_map_to_bad_request() {
        let cursor = ListingError::Cursor(CursorError {
            column: "price",
            value: "cheap".to_string(),
            expected: "a decimal number",
        });
        let err = AppError::from(cursor);
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("cheap")));

        let err = AppError::from(ListingError::InvalidBatchRow {
            index: 4,
            source: ProductValidationError::MissingTitle,
        });
        assert_eq!(
            err.to_string(),
            "invalid product at index 4: title is required"
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_errors_map_to_internal() {
        let err = AppError::from(ListingError::Store(anyhow::anyhow!("connection reset")));
        assert!(matches!(err, AppError::Internal(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
