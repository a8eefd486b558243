//! Navigation requests issued on session expiry.

/// Moves the user to another location of the application.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator for headless use: records the request in the log and tells
/// the terminal user how to get back in.
#[derive(Debug, Clone)]
pub struct HintNavigator {
    hint: String,
}

impl HintNavigator {
    pub fn new(hint: impl Into<String>) -> Self {
        Self { hint: hint.into() }
    }
}

impl Navigator for HintNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(%path, "Navigation requested");
        eprintln!("{}", self.hint);
    }
}
