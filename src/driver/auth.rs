//! Authentication tokens.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::error::DriverResult;

// ============================================================================
// AuthToken
// ============================================================================

/// Authentication token.
///
/// Only schemes with an HTTP `Authorization` header mapping are supported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthToken {
    /// No authentication
    #[default]
    None,
    /// Basic authentication (username/password)
    Basic {
        /// User name
        username: String,
        /// Password
        password: String,
    },
    /// Bearer token
    Bearer {
        /// Token value
        token: String,
    },
}

impl AuthToken {
    /// Create a basic auth token.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// No authentication.
    pub fn none() -> Self {
        Self::None
    }

    /// The authentication scheme name.
    pub fn scheme(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }

    /// The token encoded as an `Authorization` header value.
    ///
    /// Returns `None` when the request should carry no header.
    pub fn header_value(&self) -> DriverResult<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                Ok(Some(format!("Basic {}", credentials)))
            }
            Self::Bearer { token } => Ok(Some(format!("Bearer {}", token))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme() {
        assert_eq!(AuthToken::none().scheme(), "none");
        assert_eq!(AuthToken::basic("u", "p").scheme(), "basic");
        assert_eq!(AuthToken::bearer("t").scheme(), "bearer");
    }

    #[test]
    fn test_basic_header() {
        let header = AuthToken::basic("user", "pass").header_value().unwrap();
        // base64("user:pass")
        assert_eq!(header.as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_bearer_header() {
        let header = AuthToken::bearer("my-token").header_value().unwrap();
        assert_eq!(header.as_deref(), Some("Bearer my-token"));
    }

    #[test]
    fn test_none_header() {
        assert_eq!(AuthToken::none().header_value().unwrap(), None);
    }
}
