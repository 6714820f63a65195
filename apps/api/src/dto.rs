mod assets;
mod auth;
mod common;
mod dashboard;
mod navigation;
mod tickets;
mod users;

pub use assets::{AssetListResponse, AssetRowResponse, CreateAssetRequest};
pub use auth::{AuthLoginRequest, AuthLogoutResponse, AuthSessionResponse};
pub use common::{
    BadgeResponse, HealthResponse, ListStateResponse, NotificationResponse, SelectFieldResponse,
    SelectOptionResponse, UserIdentityResponse, notification_responses,
};
pub use dashboard::{DashboardResponse, StatCardResponse};
pub use navigation::{
    HomeCardResponse, NavEntryResponse, NavigationResponse, QuickActionResponse,
};
pub use tickets::{
    AssignTicketRequest, CreateTicketRequest, TicketControlsResponse, TicketListResponse,
    TicketRowResponse, UpdateTicketStatusRequest,
};
pub use users::{CreateUserRequest, UpdateUserRoleRequest, UserListResponse, UserRowResponse};
