//! Session Client CLI
//!
//! Sends requests to the application back end through the session-aware
//! pipeline, keeping the session in a file between invocations.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::Method;

use session_client::{
    current_user, login, logging, logout, register, ClientError, Config, ConsoleNotifier, FileSessionStore,
    HintNavigator, HttpClient, RequestSpec, SessionStore,
};

#[derive(Debug, Parser)]
#[command(name = "session-client", version, about = "Session-aware HTTP client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one request through the pipeline and print the response body.
    Send {
        /// HTTP method, e.g. GET or POST.
        method: String,
        /// Path relative to the configured base URL.
        path: String,
        /// JSON request body.
        #[arg(long)]
        json: Option<String>,
        /// Query parameter as key=value (repeatable).
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
    /// Log in and persist the session.
    Login { username: String, password: String },
    /// Create an account on the back end.
    Register {
        username: String,
        password: String,
        email: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the logged-in user.
    Whoami,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Missing .env is the normal case.
    let dotenv = dotenvy::dotenv();

    logging::init();

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::debug!(
        base_url = %config.client.base_url,
        timeout_ms = config.client.timeout_ms,
        store = %config.session.store_path.display(),
        "Configuration loaded"
    );

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.store_path));

    let client = HttpClient::new(
        &config,
        store.clone(),
        Arc::new(ConsoleNotifier),
        Arc::new(HintNavigator::new(
            "Run `session-client login <username> <password>` to sign in again.",
        )),
    )?;

    let result = match cli.command {
        Command::Logout => {
            logout(store.as_ref())?;
            println!("Logged out");
            return Ok(ExitCode::SUCCESS);
        }
        Command::Whoami => {
            match current_user(store.as_ref())? {
                Some(user) => println!("{} (id {})", user.username, user.id),
                None => println!("Not logged in"),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Login { username, password } => {
            login(&client, &username, &password).await.map(|user| {
                println!("Logged in as {}", user.username);
            })
        }
        Command::Register {
            username,
            password,
            email,
        } => register(&client, &username, &password, &email)
            .await
            .map(|()| println!("Registered {username}, log in to continue")),
        Command::Send {
            method,
            path,
            json,
            query,
        } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;

            let mut spec = RequestSpec::new(method, path);
            for (key, value) in query {
                spec = spec.query(key, value);
            }
            if let Some(raw) = json {
                let body: serde_json::Value =
                    serde_json::from_str(&raw).context("--json is not valid JSON")?;
                spec = spec.json(&body)?;
            }

            client.send(spec).await.map(|response| {
                tracing::debug!(status = %response.status, "Request succeeded");
                println!("{}", response.text());
            })
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown to the user by the notifier.
        Err(e) if e.failure().is_some() => Ok(ExitCode::FAILURE),
        Err(ClientError::LoginRejected(reason) | ClientError::RegistrationRejected(reason)) => {
            eprintln!("error: {reason}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
