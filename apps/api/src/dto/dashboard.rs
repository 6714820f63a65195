use serde::Serialize;
use servicedesk_application::{DashboardView, Notification, StatCard};
use ts_rs::TS;

use super::common::{NotificationResponse, notification_responses};

/// One statistics card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/stat-card-response.ts"
)]
pub struct StatCardResponse {
    pub title: String,
    pub value: u32,
    pub caption: String,
}

impl From<StatCard> for StatCardResponse {
    fn from(value: StatCard) -> Self {
        Self {
            title: value.title.to_owned(),
            value: count(value.value),
            caption: value.caption,
        }
    }
}

/// Dashboard statistics for the signed-in principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/dashboard-response.ts"
)]
pub struct DashboardResponse {
    pub total_tickets: u32,
    pub open_tickets: u32,
    pub total_assets: u32,
    pub assigned_assets: u32,
    pub cards: Vec<StatCardResponse>,
    pub notifications: Vec<NotificationResponse>,
}

impl DashboardResponse {
    #[must_use]
    pub fn from_view(view: DashboardView, notifications: Vec<Notification>) -> Self {
        Self {
            total_tickets: count(view.stats.total_tickets),
            open_tickets: count(view.stats.open_tickets),
            total_assets: count(view.stats.total_assets),
            assigned_assets: count(view.stats.assigned_assets),
            cards: view.cards.into_iter().map(StatCardResponse::from).collect(),
            notifications: notification_responses(notifications),
        }
    }
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
