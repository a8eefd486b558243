//! Error types for Session Client.
//!
//! `ClientError` is what callers of the pipeline see. The failure
//! variants carry the classified `RequestFailure` so call sites can still
//! react per endpoint after the user has been notified.

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

use crate::client::RequestFailure;

/// Failure of the persistent session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Failure of the request interceptor itself, before any I/O happens.
#[derive(Debug, Error)]
pub enum InterceptorFault {
    #[error("Failed to read credential: {0}")]
    Store(#[from] StoreError),

    #[error("Credential is not a valid header value")]
    InvalidCredential(#[source] InvalidHeaderValue),
}

/// Unified error type for requests sent through the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request interceptor failed: {0}")]
    Interceptor(#[from] InterceptorFault),

    #[error("Session expired: {0}")]
    SessionExpired(RequestFailure),

    #[error("Request rejected: {0}")]
    ServerRejected(RequestFailure),

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(RequestFailure),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Registration rejected: {0}")]
    RegistrationRejected(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The classified transport failure, if this error came from one.
    pub fn failure(&self) -> Option<&RequestFailure> {
        match self {
            ClientError::SessionExpired(f)
            | ClientError::ServerRejected(f)
            | ClientError::NetworkUnavailable(f) => Some(f),
            _ => None,
        }
    }

    /// HTTP status of the failed call, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        self.failure().and_then(RequestFailure::status)
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired(_))
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_accessors() {
        let err = ClientError::ServerRejected(RequestFailure::Server {
            status: StatusCode::FORBIDDEN,
            message: Some("forbidden".to_string()),
            body: Vec::new(),
        });
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(!err.is_session_expired());

        let err = ClientError::NetworkUnavailable(RequestFailure::Network {
            detail: "connection refused".to_string(),
        });
        assert!(err.failure().is_some());
        assert_eq!(err.status(), None);

        let err = ClientError::LoginRejected("bad password".to_string());
        assert!(err.failure().is_none());
    }

    #[test]
    fn test_body_codec_errors_are_serialization() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = decode.into();
        assert!(matches!(err, ClientError::Serialization(_)));
        assert!(err.failure().is_none());

        let err = ClientError::RegistrationRejected("Username already exists".to_string());
        assert_eq!(err.to_string(), "Registration rejected: Username already exists");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_store_error_is_wrapped_as_interceptor_fault() {
        let err: ClientError = InterceptorFault::from(StoreError::Poisoned).into();
        assert!(matches!(
            err,
            ClientError::Interceptor(InterceptorFault::Store(StoreError::Poisoned))
        ));
        assert!(err.to_string().contains("interceptor"));
    }
}
