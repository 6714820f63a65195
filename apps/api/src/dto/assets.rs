use serde::{Deserialize, Serialize};
use servicedesk_application::{AssetListView, AssetRow, Notification};
use ts_rs::TS;

use super::common::{
    BadgeResponse, ListParts, ListStateResponse, NotificationResponse, notification_responses,
};

/// Incoming payload for registering an asset.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-asset-request.ts"
)]
pub struct CreateAssetRequest {
    pub name: String,
    pub asset_type: String,
    pub serial_number: Option<String>,
}

/// API representation of one asset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/asset-row-response.ts"
)]
pub struct AssetRowResponse {
    pub id: String,
    pub name: String,
    pub asset_type: String,
    pub serial_number: Option<String>,
    pub status: BadgeResponse,
    pub assignee_name: Option<String>,
    pub created: String,
}

impl From<AssetRow> for AssetRowResponse {
    fn from(value: AssetRow) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            asset_type: value.asset_type,
            serial_number: value.serial_number,
            status: BadgeResponse::from(value.status),
            assignee_name: value.assignee_name,
            created: value.created,
        }
    }
}

/// Rendered asset list plus the notifications raised building it.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/asset-list-response.ts"
)]
pub struct AssetListResponse {
    pub state: ListStateResponse,
    pub query: String,
    pub message: Option<String>,
    pub search_placeholder: String,
    pub rows: Vec<AssetRowResponse>,
    pub notifications: Vec<NotificationResponse>,
}

impl AssetListResponse {
    #[must_use]
    pub fn from_view(view: AssetListView, notifications: Vec<Notification>) -> Self {
        let parts = ListParts::from_presentation(view.presentation, AssetRowResponse::from);
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
