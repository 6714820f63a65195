//! Notification texts and the failure reporting policy.
//!
//! Every failed backend call is logged once and produces exactly one
//! error notification. View-models never let the error escape further.

use servicedesk_core::AppError;
use tracing::error;

use crate::desk_ports::{Notification, Notifier};

/// Shown after a ticket is raised.
pub const TICKET_CREATED: &str = "Ticket created successfully";
/// Shown after a ticket status change.
pub const TICKET_UPDATED: &str = "Ticket updated successfully";
/// Shown after a ticket assignment change.
pub const TICKET_ASSIGNED: &str = "Ticket assigned successfully";
/// Shown when a ticket mutation fails.
pub const TICKET_ERROR: &str = "Failed to update ticket";
/// Shown when the ticket list cannot be fetched.
pub const TICKETS_LOAD_ERROR: &str = "Failed to load tickets";

/// Shown after an asset is registered.
pub const ASSET_CREATED: &str = "Asset created successfully";
/// Shown when an asset mutation fails.
pub const ASSET_ERROR: &str = "Failed to update asset";
/// Shown when the asset list cannot be fetched.
pub const ASSETS_LOAD_ERROR: &str = "Failed to load assets";

/// Shown after a user account is added.
pub const USER_CREATED: &str = "User created successfully";
/// Shown after a role change.
pub const USER_UPDATED: &str = "User updated successfully";
/// Shown when a user mutation fails.
pub const USER_ERROR: &str = "Failed to update user";
/// Shown when the user list cannot be fetched.
pub const USERS_LOAD_ERROR: &str = "Failed to load users";

/// Shown when dashboard statistics cannot be fetched.
pub const DASHBOARD_LOAD_ERROR: &str = "Failed to load dashboard statistics";
/// Follow-up line for [`DASHBOARD_LOAD_ERROR`].
pub const DASHBOARD_LOAD_HINT: &str = "Please refresh the page to try again";

/// Shown when a principal attempts an operation their role does not allow.
pub const ACCESS_DENIED: &str = "Access denied. Insufficient permissions.";

/// Shown after a successful sign-in.
pub const LOGIN_SUCCESS: &str = "Successfully logged in";
/// Shown when sign-in fails.
pub const LOGIN_ERROR: &str = "Invalid email or password";
/// Shown after sign-out.
pub const LOGOUT_SUCCESS: &str = "Successfully logged out";

/// Logs a failed operation and publishes its single error notification.
pub fn report_failure(notifier: &dyn Notifier, operation: &str, message: &str, failure: &AppError) {
    error!(operation, error = %failure, "{message}");
    notifier.notify(Notification::error(message, Some(failure_detail(failure))));
}

/// Publishes a success notification.
pub fn report_success(notifier: &dyn Notifier, message: &str) {
    notifier.notify(Notification::success(message));
}

fn failure_detail(failure: &AppError) -> String {
    match failure {
        AppError::Validation(detail)
        | AppError::NotFound(detail)
        | AppError::Conflict(detail)
        | AppError::Forbidden(detail) => detail.clone(),
        AppError::Unauthorized(_) => "Your session has expired. Please log in again.".to_owned(),
        AppError::Internal(_) => "An error occurred. Please try again.".to_owned(),
    }
}
