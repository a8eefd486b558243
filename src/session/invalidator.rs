//! Session invalidation on server-signaled expiry.

use std::sync::Arc;

use crate::hooks::Navigator;
use crate::session::{SessionStore, TOKEN_KEY, USER_KEY};

/// Ends the local session after the server rejected its credential.
pub trait SessionInvalidator: Send + Sync {
    fn invalidate(&self);
}

/// Clears the credential and user record, then sends the user to login.
///
/// Requests already in flight keep the credential they were sent with;
/// their outcome is up to the server.
pub struct RedirectingInvalidator {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl RedirectingInvalidator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
        }
    }
}

impl SessionInvalidator for RedirectingInvalidator {
    fn invalidate(&self) {
        if let Err(e) = self.store.remove_all(&[TOKEN_KEY, USER_KEY]) {
            // Still redirect: a stale credential will just earn another 401.
            tracing::error!(error = %e, "Failed to clear session state");
        }

        tracing::info!(login_path = %self.login_path, "Session invalidated, redirecting to login");
        self.navigator.navigate(&self.login_path);
    }
}
