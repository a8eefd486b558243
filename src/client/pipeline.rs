//! The shared, session-aware HTTP client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::{after_response, before_request, ApiResponse, RequestSpec};
use crate::client::{ReqwestTransport, Transport};
use crate::config::{Config, MessagesConfig};
use crate::error::ClientResult;
use crate::hooks::{Navigator, Notifier};
use crate::session::{RedirectingInvalidator, SessionInvalidator, SessionStore};

/// Request pipeline applying one auth and error policy to every call.
///
/// Construct once and clone it into every call site; clones share the
/// transport, store and hooks.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    invalidator: Arc<dyn SessionInvalidator>,
    messages: Arc<MessagesConfig>,
}

impl HttpClient {
    /// Build a client over `reqwest` from configuration.
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(&config.client)?;
        tracing::debug!(
            base_url = %transport.base_url(),
            timeout_ms = config.client.timeout_ms,
            "HTTP client configured"
        );

        let invalidator =
            RedirectingInvalidator::new(store.clone(), navigator, config.session.login_path.clone());

        Ok(Self::from_parts(
            Arc::new(transport),
            store,
            notifier,
            Arc::new(invalidator),
            config.messages.clone(),
        ))
    }

    /// Assemble a client from explicit collaborators.
    pub fn from_parts(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        invalidator: Arc<dyn SessionInvalidator>,
        messages: MessagesConfig,
    ) -> Self {
        Self {
            transport,
            store,
            notifier,
            invalidator,
            messages: Arc::new(messages),
        }
    }

    /// Session store the client reads credentials from.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Send a request through the interceptor pipeline.
    ///
    /// Resolves with the transport's response unmodified on 2xx. Every
    /// other outcome has already been shown to the user when the error is
    /// returned; 401 has additionally ended the session.
    pub async fn send(&self, spec: RequestSpec) -> ClientResult<ApiResponse> {
        let span = tracing::info_span!(
            "http_request",
            request_id = %Uuid::new_v4(),
            method = %spec.method,
            path = %spec.path,
        );

        async move {
            let spec = before_request(spec, self.store.as_ref())?;
            let outcome = self.transport.execute(spec).await;
            after_response(
                outcome,
                self.notifier.as_ref(),
                self.invalidator.as_ref(),
                &self.messages,
            )
        }
        .instrument(span)
        .await
    }

    /// Send a request and decode a successful body as JSON.
    pub async fn send_json<T: DeserializeOwned>(&self, spec: RequestSpec) -> ClientResult<T> {
        let response = self.send(spec).await?;
        Ok(response.json()?)
    }

    pub async fn get(&self, path: &str) -> ClientResult<ApiResponse> {
        self.send(RequestSpec::get(path)).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.send(RequestSpec::post(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<ApiResponse> {
        self.send(RequestSpec::delete(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, AUTHORIZATION};
    use reqwest::StatusCode;

    use crate::client::ResponseOutcome;
    use crate::error::{ClientError, InterceptorFault};
    use crate::session::{MemorySessionStore, TOKEN_KEY};
    use crate::test_support::{CountingInvalidator, FailingStore, RecordingNotifier};

    /// Transport that records what it was asked to send and replays a
    /// canned outcome.
    struct ScriptedTransport {
        outcome: ResponseOutcome,
        sent: Mutex<Vec<RequestSpec>>,
    }

    impl ScriptedTransport {
        fn new(outcome: ResponseOutcome) -> Self {
            Self {
                outcome,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<RequestSpec> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, spec: RequestSpec) -> ResponseOutcome {
            self.sent.lock().unwrap().push(spec);
            self.outcome.clone()
        }
    }

    fn ok_response(body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_send_runs_both_interceptors() {
        let transport = Arc::new(ScriptedTransport::new(ResponseOutcome::Success(ok_response(
            r#"{"id":1}"#,
        ))));
        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_KEY, "abc").unwrap();
        let notifier = Arc::new(RecordingNotifier::default());

        let client = HttpClient::from_parts(
            transport.clone(),
            store,
            notifier.clone(),
            Arc::new(CountingInvalidator::default()),
            MessagesConfig::default(),
        );

        let response = client.get("/api/user/info").await.unwrap();

        assert_eq!(response, ok_response(r#"{"id":1}"#));
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_interceptor_fault_skips_transport_and_notification() {
        let transport = Arc::new(ScriptedTransport::new(ResponseOutcome::Success(ok_response(
            "",
        ))));
        let notifier = Arc::new(RecordingNotifier::default());

        let client = HttpClient::from_parts(
            transport.clone(),
            Arc::new(FailingStore),
            notifier.clone(),
            Arc::new(CountingInvalidator::default()),
            MessagesConfig::default(),
        );

        let err = client.get("/").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Interceptor(InterceptorFault::Store(_))
        ));
        assert!(transport.sent().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_send_json_decodes_success_body() {
        #[derive(serde::Deserialize)]
        struct Info {
            id: i64,
        }

        let client = HttpClient::from_parts(
            Arc::new(ScriptedTransport::new(ResponseOutcome::Success(ok_response(
                r#"{"id":42}"#,
            )))),
            Arc::new(MemorySessionStore::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(CountingInvalidator::default()),
            MessagesConfig::default(),
        );

        let info: Info = client.send_json(RequestSpec::get("/")).await.unwrap();
        assert_eq!(info.id, 42);

        let err = client
            .send_json::<Vec<String>>(RequestSpec::get("/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = Config::default();
        config.client.base_url = "::not-a-url".to_string();

        let result = HttpClient::new(
            &config,
            Arc::new(MemorySessionStore::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(crate::test_support::RecordingNavigator::default()),
        );

        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
