//! Login, registration and logout against the application back end.
//!
//! The back end answers `/api/login` and `/api/register` with HTTP 200 on
//! both success and rejection and reports the result in the envelope:
//! `{"status": 1, "message": "...", "token": "...", "user": {...}}`.
//! Registration only fills `status` and `message`.

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, RequestSpec};
use crate::error::{ClientError, ClientResult, StoreError};
use crate::logging::fingerprint;
use crate::session::{SessionStore, TOKEN_KEY, USER_KEY};

/// Endpoint accepting username/password credentials.
pub const LOGIN_ENDPOINT: &str = "/api/login";

/// Endpoint creating a new account.
pub const REGISTER_ENDPOINT: &str = "/api/register";

const STATUS_OK: i64 = 1;

/// Profile of the logged-in user as returned at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Exchange username and password for a session.
///
/// On success the credential and user record are persisted in the
/// client's store, so every later request is authenticated.
pub async fn login(client: &HttpClient, username: &str, password: &str) -> ClientResult<SessionUser> {
    let spec = RequestSpec::post(LOGIN_ENDPOINT).json(&LoginRequest { username, password })?;
    let envelope: LoginEnvelope = client.send_json(spec).await?;

    let (token, user) = match envelope {
        LoginEnvelope {
            status: STATUS_OK,
            token: Some(token),
            user: Some(user),
            ..
        } if !token.is_empty() => (token, user),
        LoginEnvelope { message, .. } => {
            let reason = rejection_reason(message, "Login failed");
            tracing::info!(%username, %reason, "Login rejected");
            return Err(ClientError::LoginRejected(reason));
        }
    };

    let store = client.store();
    store.set(TOKEN_KEY, &token)?;
    store.set(USER_KEY, &serde_json::to_string(&user)?)?;

    tracing::info!(
        user_id = user.id,
        credential = %fingerprint(&token),
        "Session established"
    );

    Ok(user)
}

/// Create an account. The new user still has to log in.
pub async fn register(
    client: &HttpClient,
    username: &str,
    password: &str,
    email: &str,
) -> ClientResult<()> {
    let spec = RequestSpec::post(REGISTER_ENDPOINT).json(&RegisterRequest {
        username,
        password,
        email,
    })?;
    let envelope: LoginEnvelope = client.send_json(spec).await?;

    if envelope.status != STATUS_OK {
        let reason = rejection_reason(envelope.message, "Registration failed");
        tracing::info!(%username, %reason, "Registration rejected");
        return Err(ClientError::RegistrationRejected(reason));
    }

    tracing::info!(%username, "Account registered");
    Ok(())
}

fn rejection_reason(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Forget the current session locally.
pub fn logout(store: &dyn SessionStore) -> Result<(), StoreError> {
    store.remove_all(&[TOKEN_KEY, USER_KEY])?;
    tracing::info!("Session cleared");
    Ok(())
}

/// The stored user record, if a session exists.
pub fn current_user(store: &dyn SessionStore) -> Result<Option<SessionUser>, StoreError> {
    match store.get(USER_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
