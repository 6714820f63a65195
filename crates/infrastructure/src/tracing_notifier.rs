//! Development notifier. Writes notifications to tracing output.

use servicedesk_application::{Notification, Notifier, Severity};
use tracing::{info, warn};

/// Notifier that logs every notification instead of delivering it.
#[derive(Debug, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a new tracing notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let detail = notification.detail.as_deref().unwrap_or("");
        match notification.severity {
            Severity::Error | Severity::Warning => warn!(
                severity = notification.severity.as_str(),
                detail,
                "notification: {}",
                notification.message
            ),
            Severity::Success | Severity::Info => info!(
                severity = notification.severity.as_str(),
                detail,
                "notification: {}",
                notification.message
            ),
        }
    }
}
