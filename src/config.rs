//! Configuration module for Session Client.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub session: SessionConfig,
    pub messages: MessagesConfig,
}

/// Transport configuration, fixed for the lifetime of a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin every request path is resolved against.
    pub base_url: String,
    /// Requests exceeding this are reported as network failures.
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5003".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Session persistence and redirect configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File backing the persistent session store.
    pub store_path: PathBuf,
    /// Location the user is sent to when the session expires.
    pub login_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("session.json"),
            login_path: "/login".to_string(),
        }
    }
}

/// Fixed user-facing notification texts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub session_expired: String,
    /// Used when a server failure carries no message of its own.
    pub request_failed: String,
    pub network_error: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            session_expired: "Session expired, please log in again".to_string(),
            request_failed: "Request failed".to_string(),
            network_error: "Network error, please try again later".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SESSION_CLIENT__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("SESSION_CLIENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
