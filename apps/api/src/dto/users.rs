use serde::{Deserialize, Serialize};
use servicedesk_application::{Notification, UserListView, UserRow};
use ts_rs::TS;

use super::common::{
    BadgeResponse, ListParts, ListStateResponse, NotificationResponse, SelectFieldResponse,
    notification_responses,
};

/// Incoming payload for adding a user account.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Incoming payload for a role change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-user-role-request.ts"
)]
pub struct UpdateUserRoleRequest {
    pub role: String,
}

/// API representation of one user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-row-response.ts"
)]
pub struct UserRowResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: BadgeResponse,
    pub created: String,
    pub ticket_count: u32,
    pub asset_count: u32,
    pub role_select: SelectFieldResponse,
}

impl From<UserRow> for UserRowResponse {
    fn from(value: UserRow) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            role: BadgeResponse::from(value.role),
            created: value.created,
            ticket_count: value.ticket_count,
            asset_count: value.asset_count,
            role_select: SelectFieldResponse::from(value.role_select),
        }
    }
}

/// Rendered user list plus the notifications raised building it.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-list-response.ts"
)]
pub struct UserListResponse {
    pub state: ListStateResponse,
    pub query: String,
    pub message: Option<String>,
    pub search_placeholder: String,
    pub rows: Vec<UserRowResponse>,
    pub notifications: Vec<NotificationResponse>,
}

impl UserListResponse {
    #[must_use]
    pub fn from_view(view: UserListView, notifications: Vec<Notification>) -> Self {
        let parts = ListParts::from_presentation(view.presentation, UserRowResponse::from);
        Self {
            state: parts.state,
            query: parts.query,
            message: view.message.map(ToOwned::to_owned),
            search_placeholder: view.search_placeholder.to_owned(),
            rows: parts.rows,
            notifications: notification_responses(notifications),
        }
    }
}
