//! Payment gateway error types.

use thiserror::Error;

/// A result type using `GatewayError`.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors from the payment gateway collaborator.
///
/// A declined charge is not an error; it is reported through
/// [`crate::SaleOutcome::Declined`]. This type carries transport and
/// gateway-level failures only.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request could not be completed.
    #[error("gateway request failed: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("gateway error ({status}): {message}")]
    Api {
        /// HTTP status returned by the gateway.
        status: u16,
        /// Error message from the gateway, or a synthesized one.
        message: String,
    },

    /// The gateway answered 2xx with a body we could not interpret.
    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = GatewayError::Api {
            status: 401,
            message: "credentials rejected".to_string(),
        };
        assert_eq!(err.to_string(), "gateway error (401): credentials rejected");
    }

    #[test]
    fn transport_error_display() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
