//! Error responses.
//!
//! Every non-2xx body produced by a handler is `{"detail": "<message>"}`.
//! This is the only place status codes are chosen for failures.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::latency::DelayError;

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent something unusable. 400.
    #[error("{0}")]
    BadRequest(String),

    /// Simulated failure. 500.
    #[error("{0}")]
    Internal(String),

    /// Simulated dependency outage. 503.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Server-side deadline exceeded. 504.
    #[error("{0}")]
    GatewayTimeout(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}

impl From<DelayError> for ApiError {
    fn from(err: DelayError) -> Self {
        match err {
            DelayError::InvalidRequest { max_ms, .. } => ApiError::BadRequest(format!(
                "Requested delay exceeds the maximum allowed limit of {max_ms}ms."
            )),
            DelayError::DeadlineExceeded => {
                ApiError::GatewayTimeout("Request processing timed out on the server.".to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
