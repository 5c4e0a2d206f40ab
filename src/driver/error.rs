//! Driver error types.

use thiserror::Error;

use crate::http::error::ErrorCode;

// ============================================================================
// DriverError
// ============================================================================

/// Driver error.
///
/// Errors are `Clone` so a terminal failure can be latched by a response
/// reader and re-raised from every later accessor. Transport failures are
/// carried as messages for the same reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    /// Malformed wire payload, ordering violation, or unknown tag
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Transport or body-read failure
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid caller-supplied configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Value could not be converted to the requested type
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Failure reported by the server
    #[error("Server error: {code} - {message}")]
    Server { code: String, message: String },
}

impl DriverError {
    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a type conversion error.
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// Create a server error.
    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Server {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The error code attached to this failure.
    pub fn code(&self) -> &str {
        match self {
            Self::Protocol(_) => ErrorCode::PROTOCOL_ERROR,
            Self::ServiceUnavailable(_) => ErrorCode::SERVICE_UNAVAILABLE,
            Self::Server { code, .. } => code,
            Self::Configuration(_) | Self::Serialization(_) | Self::TypeConversion(_) => {
                ErrorCode::CLIENT_ERROR
            }
        }
    }

    /// Whether retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceUnavailable(_) => true,
            Self::Server { code, .. } => ErrorCode::is_retryable(code),
            _ => false,
        }
    }

    /// Whether the error originates on the caller's side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Serialization(_) | Self::TypeConversion(_)
        )
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// Driver result type.
pub type DriverResult<T> = Result<T, DriverError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DriverError::protocol("bad tag");
        assert!(matches!(err, DriverError::Protocol(_)));

        let err = DriverError::server("Neo.ClientError.Statement.SyntaxError", "bad syntax");
        assert!(matches!(err, DriverError::Server { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = DriverError::protocol("unknown tag 'Blob'");
        assert_eq!(err.to_string(), "Protocol error: unknown tag 'Blob'");

        let err = DriverError::server("Neo.ClientError.Statement.SyntaxError", "bad syntax");
        assert_eq!(
            err.to_string(),
            "Server error: Neo.ClientError.Statement.SyntaxError - bad syntax"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DriverError::protocol("x").code(), "ProtocolError");
        assert_eq!(
            DriverError::service_unavailable("x").code(),
            "ServiceUnavailable"
        );
        assert_eq!(DriverError::server("Neo.Custom", "x").code(), "Neo.Custom");
    }

    #[test]
    fn test_error_retryable() {
        assert!(DriverError::service_unavailable("down").is_retryable());
        assert!(DriverError::server(
            "Neo.TransientError.General.DatabaseUnavailable",
            "busy"
        )
        .is_retryable());
        assert!(!DriverError::protocol("bad").is_retryable());
    }

    #[test]
    fn test_error_client_error() {
        assert!(DriverError::configuration("bad scheme").is_client_error());
        assert!(DriverError::type_conversion("no").is_client_error());
        assert!(!DriverError::service_unavailable("down").is_client_error());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: DriverError = io_err.into();
        assert!(matches!(err, DriverError::ServiceUnavailable(_)));
    }
}
