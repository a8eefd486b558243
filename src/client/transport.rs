//! Network transport executing requests against the configured origin.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::client::{ApiResponse, RequestBody, RequestSpec, ResponseOutcome};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Executes a prepared request and reports what happened.
///
/// Implementations never fail outright: anything that prevents a server
/// response is reported as a network failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, spec: RequestSpec) -> ResponseOutcome;
}

/// `reqwest`-backed transport with a fixed base address and timeout.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::Config(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base address.
    ///
    /// The path is appended to the base rather than resolved as a relative
    /// reference, so a base of `http://host/api` and a path of `/users`
    /// yields `http://host/api/users`.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Url::parse(base);
        }
        Url::parse(&format!("{base}/{path}"))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, spec: RequestSpec) -> ResponseOutcome {
        let url = match self.endpoint(&spec.path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(path = %spec.path, error = %e, "Could not build request URL");
                return ResponseOutcome::network(format!("invalid request path: {}", e));
            }
        };

        let mut request = self.client.request(spec.method, url).headers(spec.headers);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        request = match spec.body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Raw { content_type, data }) => {
                match HeaderValue::from_str(&content_type) {
                    Ok(value) => request.header(CONTENT_TYPE, value).body(data),
                    Err(_) => {
                        tracing::warn!(%content_type, "Dropping invalid content type");
                        request.body(data)
                    }
                }
            }
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    "Request did not reach the server"
                );
                return ResponseOutcome::network(e.to_string());
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(%status, error = %e, timeout = e.is_timeout(), "Failed to read response body");
                return ResponseOutcome::network(e.to_string());
            }
        };

        tracing::debug!(%status, body_len = body.len(), "Response received");

        if status.is_success() {
            ResponseOutcome::Success(ApiResponse {
                status,
                headers,
                body,
            })
        } else {
            ResponseOutcome::server(status, body)
        }
    }
}
