//! Client error type
//!
//! Every propagated store operation fails with a `ClientError`. Swallowed
//! operations never surface one; see `stores::Refresh`.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Request never produced a response (DNS, connection refused, CORS, ...)
    Network(String),
    /// Backend answered with a non-2xx status
    Http { status: u16, message: String },
    /// Response body did not have the expected shape
    Decode(String),
    /// Rejected locally before any request was sent
    InvalidInput(String),
}

impl ClientError {
    /// HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            Self::Decode(msg) => write!(f, "Parse error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let err = ClientError::Http { status: 401, message: "Unauthorized".to_string() };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());

        let err = ClientError::Network("offline".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_display() {
        let err = ClientError::Http { status: 400, message: "Insufficient balance".to_string() };
        assert_eq!(err.to_string(), "HTTP 400: Insufficient balance");

        let err = ClientError::InvalidInput("amount".to_string());
        assert_eq!(err.to_string(), "Invalid input: amount");
    }
}
