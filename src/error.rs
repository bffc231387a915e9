// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Code exchange failed, or the retry budget is exhausted. Terminal:
    /// the user must restart the flow at /auth.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Token refresh failed; the stale pair stays in place. Terminal.
    #[error("Token refresh failed: {0}")]
    Refresh(String),

    /// The data endpoint rejected the access token (401). Intercepted by the
    /// retry coordinator; reaching a response means the one allowed refresh
    /// was already spent.
    #[error("Access token expired")]
    AuthExpired,

    /// Non-auth HTTP or network failure during pagination. Terminal for the
    /// request; no partial data is returned.
    #[error("Fitbit API error: {0}")]
    Fetch(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Authorization(msg) => (
                StatusCode::UNAUTHORIZED,
                "authorization_error",
                Some(msg.clone()),
            ),
            AppError::Refresh(msg) => {
                (StatusCode::UNAUTHORIZED, "refresh_error", Some(msg.clone()))
            }
            AppError::AuthExpired => (StatusCode::UNAUTHORIZED, "auth_expired", None),
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "fitbit_error", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        tracing::warn!(error, status = %status, "Request failed");

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
