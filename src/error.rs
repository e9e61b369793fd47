use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ErrorBody;

/// Failures surfaced by the prediction and messaging pipeline.
///
/// `Validation` carries a reason meant for the caller. `Internal` carries a
/// cause that is only ever written to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ApiError::Validation(reason.into())
    }

    pub fn internal(cause: impl Into<String>) -> Self {
        ApiError::Internal(cause.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(reason) => {
                tracing::warn!(reason = %reason, "validation error");
                ErrorBody {
                    error: "Validation error".to_string(),
                    detail: reason,
                }
            }
            ApiError::Internal(cause) => {
                tracing::error!(cause = %cause, "unhandled error");
                ErrorBody {
                    error: "Internal server error".to_string(),
                    detail: "An unexpected error occurred".to_string(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::validation("Scores must be between 0 and 100");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Scores must be between 0 and 100");
    }

    #[test]
    fn internal_maps_to_server_error() {
        let err = ApiError::internal("model returned 1.7");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
