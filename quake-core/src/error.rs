/// Error types for the quake core library
use thiserror::Error;

/// Failure of a feed fetch. Surfaced to the user as a single message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// HTTP request could not be sent or completed
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Bad response status: {0}")]
    Status(u16),

    /// Response body could not be read or decoded
    #[error("Failed to read response body: {0}")]
    Decode(String),

    /// Local feed file could not be read
    #[error("Failed to read feed file: {0}")]
    Read(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failure without any usable description
    #[error("")]
    Unspecified,
}

impl FetchError {
    /// User-visible message, or `None` when the failure carries no description.
    pub fn message(&self) -> Option<String> {
        match self {
            FetchError::Unspecified => None,
            FetchError::Request(detail) | FetchError::Decode(detail) | FetchError::Read(detail)
                if detail.trim().is_empty() =>
            {
                None
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() || e.is_body() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// A field or axis name outside the accepted set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field: {0}")]
pub struct UnknownFieldError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_for_described_failures() {
        assert_eq!(
            FetchError::Status(503).message().as_deref(),
            Some("Bad response status: 503")
        );
        assert_eq!(
            FetchError::Timeout.message().as_deref(),
            Some("Request timed out")
        );
    }

    #[test]
    fn test_message_missing() {
        assert_eq!(FetchError::Unspecified.message(), None);
        assert_eq!(FetchError::Request("  ".to_string()).message(), None);
    }
}
