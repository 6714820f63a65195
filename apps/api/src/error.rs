use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use servicedesk_application::Notification;
use servicedesk_core::AppError;
use ts_rs::TS;

use crate::dto::NotificationResponse;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    notifications: Vec<NotificationResponse>,
}

/// HTTP API error wrapper around core application errors.
///
/// Carries the notifications a view-model raised before failing so the
/// client can still show them.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    notifications: Vec<Notification>,
}

impl ApiError {
    pub fn with_notifications(error: AppError, notifications: Vec<Notification>) -> Self {
        Self {
            error,
            notifications,
        }
    }

    #[cfg(test)]
    pub fn error(&self) -> &AppError {
        &self.error
    }

    #[cfg(test)]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    fn status(&self) -> StatusCode {
        match self.error {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self::with_notifications(value, Vec::new())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let payload = Json(ErrorResponse {
            message: self.error.to_string(),
            notifications: self
                .notifications
                .into_iter()
                .map(NotificationResponse::from)
                .collect(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
