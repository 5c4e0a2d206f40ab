//! Query API error codes.

/// Error codes attached by the codec and readers.
///
/// Server-side failures keep the code reported by the server; these
/// constants cover failures raised on the client.
pub struct ErrorCode;

impl ErrorCode {
    /// Malformed wire payload, ordering violation, or unknown tag.
    pub const PROTOCOL_ERROR: &'static str = "ProtocolError";

    /// Transport or body-read failure.
    pub const SERVICE_UNAVAILABLE: &'static str = "ServiceUnavailable";

    /// Invalid caller input (unsupported parameter, bad configuration).
    pub const CLIENT_ERROR: &'static str = "ClientError";
}

impl ErrorCode {
    /// Whether a server error code marks a transient condition.
    pub fn is_retryable(code: &str) -> bool {
        code.starts_with("Neo.TransientError")
            || code == "Neo.ClientError.Cluster.NotALeader"
            || code == "Neo.ClientError.General.ForbiddenOnReadOnlyDatabase"
    }

    /// Whether a server error code marks a security failure.
    pub fn is_security(code: &str) -> bool {
        code.contains("Security") || code.contains("Authentication")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_codes() {
        assert!(ErrorCode::is_retryable(
            "Neo.TransientError.General.DatabaseUnavailable"
        ));
        assert!(ErrorCode::is_retryable("Neo.ClientError.Cluster.NotALeader"));
        assert!(!ErrorCode::is_retryable(
            "Neo.ClientError.Statement.SyntaxError"
        ));
    }

    #[test]
    fn test_security_codes() {
        assert!(ErrorCode::is_security(
            "Neo.ClientError.Security.Unauthorized"
        ));
        assert!(!ErrorCode::is_security("Neo.ClientError.Statement.SyntaxError"));
    }
}
