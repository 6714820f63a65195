pub mod assets;
pub mod dashboard;
pub mod health;
pub mod navigation;
pub mod tickets;
pub mod users;

use serde::Deserialize;
use servicedesk_application::notices::report_failure;
use servicedesk_core::AppError;
use servicedesk_infrastructure::CollectingNotifier;

use crate::error::ApiError;

/// Search text carried by list and mutation requests.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub query: Option<String>,
}

impl ListQuery {
    fn non_blank(self) -> Option<String> {
        self.query.filter(|query| !query.trim().is_empty())
    }
}

/// Reports a request rejected before any view-model ran.
fn rejected(
    notifier: &CollectingNotifier,
    operation: &str,
    message: &str,
    error: AppError,
) -> ApiError {
    report_failure(notifier, operation, message, &error);
    ApiError::with_notifications(error, notifier.drain())
}

#[cfg(test)]
mod tests;
