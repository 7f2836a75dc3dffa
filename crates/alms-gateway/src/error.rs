//! API error types and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// API error type that implements `IntoResponse`.
///
/// Bodies are plain text: the donation endpoints are consumed by simple
/// form-post clients that surface the body verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request input; the message enumerates every violated rule.
    #[error("{0}")]
    BadRequest(String),

    /// The payment gateway failed at the transport level while processing a
    /// donation. Gateway detail is deliberately not echoed to the caller.
    #[error("Payment gateway rejected this transaction")]
    GatewayUnavailable,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::GatewayUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
