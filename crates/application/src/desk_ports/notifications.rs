use serde::Serialize;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
    /// Operation completed with caveats.
    Warning,
}

impl Severity {
    /// Returns a stable label for logs and payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Visual weight.
    pub severity: Severity,
    /// Headline.
    pub message: String,
    /// Optional secondary line.
    pub detail: Option<String>,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates an error notification with an optional detail line.
    #[must_use]
    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            detail,
        }
    }
}

/// Fire-and-forget sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Publishes a notification. Delivery failures are the sink's concern.
    fn notify(&self, notification: Notification);
}
