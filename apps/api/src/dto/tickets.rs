use serde::{Deserialize, Serialize};
use servicedesk_application::{Notification, TicketControls, TicketListView, TicketRow};
use ts_rs::TS;

use super::common::{
    BadgeResponse, ListParts, ListStateResponse, NotificationResponse, SelectFieldResponse,
    notification_responses,
};

/// Incoming payload for raising a ticket.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-ticket-request.ts"
)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
}

/// Incoming payload for a status change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-ticket-status-request.ts"
)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

/// Incoming payload for an assignment change.
///
/// `assignee` is an option value of the assignee selector: a user id or `"unassigned"`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/assign-ticket-request.ts"
)]
pub struct AssignTicketRequest {
    pub assignee: String,
}

/// Admin selectors attached to a ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/ticket-controls-response.ts"
)]
pub struct TicketControlsResponse {
    pub status: SelectFieldResponse,
    pub assignee: SelectFieldResponse,
}

impl From<TicketControls> for TicketControlsResponse {
    fn from(value: TicketControls) -> Self {
        Self {
            status: SelectFieldResponse::from(value.status),
            assignee: SelectFieldResponse::from(value.assignee),
        }
    }
}

/// API representation of one ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/ticket-row-response.ts"
)]
pub struct TicketRowResponse {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub priority: BadgeResponse,
    pub status: BadgeResponse,
    pub category: String,
    pub created: String,
    pub creator_name: String,
    pub assignee_name: Option<String>,
    pub controls: Option<TicketControlsResponse>,
}

impl From<TicketRow> for TicketRowResponse {
    fn from(value: TicketRow) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            excerpt: value.excerpt,
            priority: BadgeResponse::from(value.priority),
            status: BadgeResponse::from(value.status),
            category: value.category,
            created: value.created,
            creator_name: value.creator_name,
            assignee_name: value.assignee_name,
            controls: value.controls.map(TicketControlsResponse::from),
        }
    }
}

/// Rendered ticket list plus the notifications raised building it.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/ticket-list-response.ts"
)]
pub struct TicketListResponse {
    pub state: ListStateResponse,
    pub query: String,
    pub message: Option<String>,
    pub search_placeholder: String,
    pub rows: Vec<TicketRowResponse>,
    pub notifications: Vec<NotificationResponse>,
}

impl TicketListResponse {
    #[must_use]
    pub fn from_view(view: TicketListView, notifications: Vec<Notification>) -> Self {
        let parts = ListParts::from_presentation(view.presentation, TicketRowResponse::from);
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
