//! Messaging error types.

use thiserror::Error;

/// A result type using `PubsubError`.
pub type Result<T> = std::result::Result<T, PubsubError>;

/// Errors from the pub/sub broker.
#[derive(Debug, Error)]
pub enum PubsubError {
    /// The topic already exists (broker conflict, HTTP 409).
    ///
    /// [`crate::resolve_topic`] treats this as success; it only surfaces to
    /// callers driving `create_topic` directly.
    #[error("topic already exists: {0}")]
    TopicExists(String),

    /// The HTTP request could not be completed.
    #[error("pubsub request failed: {0}")]
    Transport(String),

    /// The broker answered with a non-success status.
    #[error("pubsub error ({status}): {message}")]
    Api {
        /// HTTP status returned by the broker.
        status: u16,
        /// Error message from the broker, or a synthesized one.
        message: String,
    },

    /// The broker answered 2xx with a body we could not interpret.
    #[error("unexpected pubsub response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_display_names_the_topic() {
        let err = PubsubError::TopicExists("donations".to_string());
        assert_eq!(err.to_string(), "topic already exists: donations");
    }
}
