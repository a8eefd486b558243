//! Session Client - session-aware HTTP client
//!
//! Wraps every outgoing request in one policy: attach the stored bearer
//! credential, surface failures to the user, and end the session when the
//! server reports it expired.

pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod session;

#[cfg(test)]
mod test_support;

pub use crate::client::{
    after_response, before_request, ApiResponse, FailureKind, HttpClient, RequestBody,
    RequestFailure, RequestSpec, ResponseOutcome, ReqwestTransport, Transport,
};
pub use crate::config::Config;
pub use crate::error::{ClientError, ClientResult, InterceptorFault, StoreError};
pub use crate::hooks::{ConsoleNotifier, HintNavigator, Navigator, Notifier};
pub use crate::session::{
    current_user, login, logout, register, FileSessionStore, MemorySessionStore,
    RedirectingInvalidator, SessionInvalidator, SessionStore, SessionUser, TOKEN_KEY, USER_KEY,
};
