use serde::Serialize;
use servicedesk_application::{HomeCard, NavEntry, NavigationView, QuickActionEntry};
use ts_rs::TS;

/// Sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/nav-entry-response.ts"
)]
pub struct NavEntryResponse {
    pub label: String,
    pub path: String,
    pub active: bool,
}

impl From<NavEntry> for NavEntryResponse {
    fn from(value: NavEntry) -> Self {
        Self {
            label: value.label.to_owned(),
            path: value.path.to_owned(),
            active: value.active,
        }
    }
}

/// Home page section card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/home-card-response.ts"
)]
pub struct HomeCardResponse {
    pub title: String,
    pub description: String,
    pub action: String,
    pub path: String,
}

impl From<HomeCard> for HomeCardResponse {
    fn from(value: HomeCard) -> Self {
        Self {
            title: value.title.to_owned(),
            description: value.description.to_owned(),
            action: value.action.to_owned(),
            path: value.path.to_owned(),
        }
    }
}

/// Quick action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/quick-action-response.ts"
)]
pub struct QuickActionResponse {
    pub action: String,
    pub label: String,
}

impl From<QuickActionEntry> for QuickActionResponse {
    fn from(value: QuickActionEntry) -> Self {
        Self {
            action: value.action.as_str().to_owned(),
            label: value.label.to_owned(),
        }
    }
}

/// Page chrome for the current principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/navigation-response.ts"
)]
pub struct NavigationResponse {
    pub sidebar: Option<Vec<NavEntryResponse>>,
    pub home_cards: Vec<HomeCardResponse>,
    pub quick_actions: Vec<QuickActionResponse>,
}

impl From<NavigationView> for NavigationResponse {
    fn from(value: NavigationView) -> Self {
        Self {
            sidebar: value.sidebar.map(|entries| {
                entries.into_iter().map(NavEntryResponse::from).collect()
            }),
            home_cards: value
                .home_cards
                .into_iter()
                .map(HomeCardResponse::from)
                .collect(),
            quick_actions: value
                .quick_actions
                .into_iter()
                .map(QuickActionResponse::from)
                .collect(),
        }
    }
}
