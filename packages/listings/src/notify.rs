//! User-facing notifications.

/// The only message a failed fetch ever shows the user.
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch listings";

/// Fire-and-forget error notification (a toast, in the web UI).
///
/// No `Send + Sync` bound: UI toasters live on the UI thread. Callers that
/// share a notifier across tasks ask for `dyn BaseNotifier + Send + Sync`.
pub trait BaseNotifier {
    fn error(&self, message: &str);
}

/// Notifier for headless use: the message goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl BaseNotifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(notification = message, "User notification");
    }
}
