//! Gateway error types
//!
//! Two failure classes reach callers: the request never produced a usable
//! response (transport), or the response body did not have the expected
//! shape (decode).

use thiserror::Error;

/// Errors that can occur while fetching from the usage API
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl GatewayError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }
}

/// The request did not produce a successful response
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established
    #[error("{url} unreachable: {message}")]
    Unreachable { url: String, message: String },

    /// The transport gave up waiting
    #[error("{url} timed out")]
    Timeout { url: String },

    /// Server answered with a non-2xx status
    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// Response body could not be read
    #[error("{url} body unreadable: {message}")]
    Body { url: String, message: String },
}

/// The response body was not what the endpoint promises
#[derive(Error, Debug)]
#[error("{endpoint}: {message}")]
pub struct DecodeError {
    /// Endpoint path the body came from
    pub endpoint: String,
    pub message: String,
}

impl DecodeError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: GatewayError = TransportError::Status {
            url: "http://localhost:8000/api/regions".to_string(),
            status: 503,
            body: "maintenance".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Transport error: http://localhost:8000/api/regions returned 503: maintenance"
        );
        assert!(err.is_transport());

        let err: GatewayError = DecodeError::new("/api/data", "expected a sequence").into();
        assert_eq!(err.to_string(), "Decode error: /api/data: expected a sequence");
        assert!(err.is_decode());
    }
}
