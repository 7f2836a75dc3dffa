//! Configuration-loading error types.

use thiserror::Error;

/// A result type using `ConfigError`.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading the client registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The registry file could not be read.
    #[error("failed to read client registry: {0}")]
    Io(#[from] std::io::Error),

    /// The registry file is not valid JSON or has the wrong shape.
    #[error("failed to parse client registry: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("failed to parse client registry"));
    }
}
