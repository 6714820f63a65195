//! Application services, view-models and ports.

#![forbid(unsafe_code)]

pub mod access_gate;
pub mod asset_inventory;
pub mod collection_view;
pub mod dashboard_service;
pub mod desk_ports;
pub mod navigation;
pub mod notices;
pub mod search_mode;
pub mod session_service;
pub mod strings;
pub mod ticket_board;
pub mod user_admin;

pub use access_gate::{AccessGate, GateDecision, GateView, Placeholder};
pub use asset_inventory::{AssetInventory, AssetListView, AssetRow};
pub use collection_view::{CollectionView, ListPresentation, ListState, LoadOutcome, SelectField};
pub use dashboard_service::{DashboardService, DashboardStats, DashboardView, StatCard};
pub use desk_ports::{
    AssetGateway, AssigneeSelection, Notification, Notifier, Severity, TicketGateway,
    UserDirectory,
};
pub use navigation::{HomeCard, NavEntry, NavigationView, QuickActionEntry, navigation_view};
pub use search_mode::SearchMode;
pub use session_service::{
    SessionBound, SessionRegistry, SessionService, SessionState, follow_session,
};
pub use strings::{Locale, StringCatalog, Strings};
pub use ticket_board::{TicketBoard, TicketControls, TicketListView, TicketRow};
pub use user_admin::{UserAdmin, UserListView, UserRow};
