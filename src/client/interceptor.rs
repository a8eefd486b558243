//! Request and response interceptors.
//!
//! Both stages are plain functions so each can be exercised without a
//! transport:
//! - `before_request`: attaches the stored bearer credential
//! - `after_response`: classifies failures and dispatches side effects

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

use crate::client::{ApiResponse, RequestSpec, ResponseOutcome};
use crate::config::MessagesConfig;
use crate::error::{ClientError, InterceptorFault};
use crate::hooks::Notifier;
use crate::logging::fingerprint;
use crate::session::{SessionInvalidator, SessionStore, TOKEN_KEY};

/// Attach `Authorization: Bearer <credential>` when a credential is stored.
///
/// The stored credential always replaces a caller-supplied `Authorization`
/// header. Without a credential (or with an empty one) the headers are
/// left untouched. Faults are logged and returned unchanged; they are
/// never shown to the user.
pub fn before_request(
    mut spec: RequestSpec,
    store: &dyn SessionStore,
) -> Result<RequestSpec, InterceptorFault> {
    let credential = store.get(TOKEN_KEY).map_err(|e| {
        tracing::error!(error = %e, "Request interceptor could not read credential");
        InterceptorFault::Store(e)
    })?;

    let Some(credential) = credential.filter(|c| !c.is_empty()) else {
        tracing::debug!("No credential stored, sending request unauthenticated");
        return Ok(spec);
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {credential}")).map_err(|e| {
        tracing::error!(
            credential = %fingerprint(&credential),
            "Stored credential is not a valid header value"
        );
        InterceptorFault::InvalidCredential(e)
    })?;
    value.set_sensitive(true);

    spec.headers.insert(AUTHORIZATION, value);
    tracing::debug!(credential = %fingerprint(&credential), "Attached bearer credential");

    Ok(spec)
}

/// Pass successes through and classify failures.
///
/// - 401: notify session expiry, invalidate the session, fail the call
/// - other statuses: notify the server message (or a fallback), fail
/// - no response: notify a network error, fail
///
/// Every failure notifies exactly once and is returned to the caller.
/// Nothing is retried.
pub fn after_response(
    outcome: ResponseOutcome,
    notifier: &dyn Notifier,
    invalidator: &dyn SessionInvalidator,
    messages: &MessagesConfig,
) -> Result<ApiResponse, ClientError> {
    let failure = match outcome {
        ResponseOutcome::Success(response) => return Ok(response),
        ResponseOutcome::Failure(failure) => failure,
    };

    match failure.status() {
        Some(StatusCode::UNAUTHORIZED) => {
            tracing::warn!("Server rejected credential, ending session");
            notifier.display(&messages.session_expired);
            invalidator.invalidate();
            Err(ClientError::SessionExpired(failure))
        }
        Some(status) => {
            let message = failure.message().unwrap_or(&messages.request_failed);
            tracing::warn!(%status, %message, "Server rejected request");
            notifier.display(message);
            Err(ClientError::ServerRejected(failure))
        }
        None => {
            tracing::warn!(detail = %failure, "No response from server");
            notifier.display(&messages.network_error);
            Err(ClientError::NetworkUnavailable(failure))
        }
    }
}
