//! User-facing notification sink.

/// Displays a message to the end user. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn display(&self, message: &str);
}

/// Writes notifications to stderr for terminal users.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn display(&self, message: &str) {
        tracing::debug!(%message, "Displaying notification");
        eprintln!("error: {message}");
    }
}
