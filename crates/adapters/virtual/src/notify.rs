//! Logging notifier.

use roost_app::ports::Notifier;

/// Notifier that writes every message to the `tracing` pipeline at `INFO`.
///
/// Useful as the default notification channel when no push/email transport
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "roost::notify", "{message}");
    }
}
