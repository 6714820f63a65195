use serde::Serialize;
use servicedesk_application::{ListPresentation, Notification, SelectField};
use servicedesk_core::Principal;
use servicedesk_domain::{Badge, SelectOption};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
}

/// Toast raised while serving a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/notification-response.ts"
)]
pub struct NotificationResponse {
    pub severity: String,
    pub message: String,
    pub detail: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            severity: value.severity.as_str().to_owned(),
            message: value.message,
            detail: value.detail,
        }
    }
}

pub fn notification_responses(notifications: Vec<Notification>) -> Vec<NotificationResponse> {
    notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect()
}

/// Badge label with its CSS classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/badge-response.ts"
)]
pub struct BadgeResponse {
    pub label: String,
    pub class_name: String,
}

impl From<Badge> for BadgeResponse {
    fn from(value: Badge) -> Self {
        Self {
            class_name: value.tone.css_class().to_owned(),
            label: value.label,
        }
    }
}

/// One drop-down option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/select-option-response.ts"
)]
pub struct SelectOptionResponse {
    pub value: String,
    pub label: String,
}

impl From<SelectOption> for SelectOptionResponse {
    fn from(value: SelectOption) -> Self {
        Self {
            value: value.value,
            label: value.label,
        }
    }
}

/// Drop-down with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/select-field-response.ts"
)]
pub struct SelectFieldResponse {
    pub value: String,
    pub options: Vec<SelectOptionResponse>,
}

impl From<SelectField> for SelectFieldResponse {
    fn from(value: SelectField) -> Self {
        Self {
            value: value.value,
            options: value
                .options
                .into_iter()
                .map(SelectOptionResponse::from)
                .collect(),
        }
    }
}

/// What a list page shows in place of, or above, its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/list-state-response.ts"
)]
pub enum ListStateResponse {
    Loading,
    Empty,
    NoMatches,
    Rows,
}

/// Flattened list presentation shared by every list response.
pub(crate) struct ListParts<R> {
    pub state: ListStateResponse,
    pub query: String,
    pub rows: Vec<R>,
}

impl<R> ListParts<R> {
    pub(crate) fn from_presentation<T>(
        presentation: ListPresentation<T>,
        convert: impl FnMut(T) -> R,
    ) -> Self {
        match presentation {
            ListPresentation::Loading => Self::without_rows(ListStateResponse::Loading, String::new()),
            ListPresentation::Empty => Self::without_rows(ListStateResponse::Empty, String::new()),
            ListPresentation::NoMatches { query } => {
                Self::without_rows(ListStateResponse::NoMatches, query)
            }
            ListPresentation::Rows { query, rows } => Self {
                state: ListStateResponse::Rows,
                query,
                rows: rows.into_iter().map(convert).collect(),
            },
        }
    }

    fn without_rows(state: ListStateResponse, query: String) -> Self {
        Self {
            state,
            query,
            rows: Vec::new(),
        }
    }
}

/// API representation of the signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
}

impl From<&Principal> for UserIdentityResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_string(),
            name: principal.display_name().to_owned(),
            email: principal.email().to_owned(),
            role: principal.role().as_str().to_owned(),
            is_admin: principal.is_admin(),
        }
    }
}
