//! Transport outcomes as seen by the response interceptor.

use std::borrow::Cow;
use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A successful (2xx) response, passed to callers unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Broad category of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a server response (connect error, timeout).
    Network,
    /// The server answered with a non-success status.
    Server,
}

/// A failed call, before or after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestFailure {
    Network {
        /// Transport-level description, for logs only.
        detail: String,
    },
    Server {
        status: StatusCode,
        /// `message` field of a JSON error body, if the server sent one.
        message: Option<String>,
        body: Vec<u8>,
    },
}

impl RequestFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            RequestFailure::Network { .. } => FailureKind::Network,
            RequestFailure::Server { .. } => FailureKind::Server,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestFailure::Network { .. } => None,
            RequestFailure::Server { status, .. } => Some(*status),
        }
    }

    /// Server-supplied message, ignoring an empty one.
    pub fn message(&self) -> Option<&str> {
        match self {
            RequestFailure::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Network { detail } => write!(f, "{detail}"),
            RequestFailure::Server { status, .. } => match self.message() {
                Some(message) => write!(f, "{status}: {message}"),
                None => write!(f, "{status}"),
            },
        }
    }
}

/// Result of executing one request on the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    Success(ApiResponse),
    Failure(RequestFailure),
}

impl ResponseOutcome {
    pub fn network(detail: impl Into<String>) -> Self {
        ResponseOutcome::Failure(RequestFailure::Network {
            detail: detail.into(),
        })
    }

    /// Build a server failure, lifting `message` out of a JSON body.
    pub fn server(status: StatusCode, body: Vec<u8>) -> Self {
        let message = extract_message(&body);
        ResponseOutcome::Failure(RequestFailure::Server {
            status,
            message,
            body,
        })
    }
}

fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}
