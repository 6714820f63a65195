use std::sync::{Arc, Mutex, PoisonError};

use servicedesk_application::{Notification, Notifier};

/// Notifier that keeps notifications so a response can carry them.
///
/// Every notification is also forwarded to `inner`, if one was given.
#[derive(Default)]
pub struct CollectingNotifier {
    collected: Mutex<Vec<Notification>>,
    inner: Option<Arc<dyn Notifier>>,
}

impl CollectingNotifier {
    /// Creates an empty collector forwarding to `inner`.
    #[must_use]
    pub fn forwarding_to(inner: Arc<dyn Notifier>) -> Self {
        Self {
            collected: Mutex::new(Vec::new()),
            inner: Some(inner),
        }
    }

    /// Removes and returns everything collected so far, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        let mut collected = self
            .collected
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *collected)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        if let Some(inner) = &self.inner {
            inner.notify(notification.clone());
        }
        self.collected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use servicedesk_application::{Notification, Notifier, Severity};

    use super::CollectingNotifier;
    use crate::TracingNotifier;

    #[test]
    fn drain_returns_in_order_and_empties() {
        let collector = CollectingNotifier::forwarding_to(Arc::new(TracingNotifier::new()));
        collector.notify(Notification::success("first"));
        collector.notify(Notification::error("second", None));

        let drained = collector.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].severity, Severity::Error);
        assert!(collector.drain().is_empty());
    }
}
