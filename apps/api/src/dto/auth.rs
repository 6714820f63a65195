use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{NotificationResponse, UserIdentityResponse};

/// Incoming payload for email sign-in.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    pub email: String,
}

/// Session established by a successful sign-in.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-session-response.ts"
)]
pub struct AuthSessionResponse {
    pub user: UserIdentityResponse,
    pub notifications: Vec<NotificationResponse>,
}

/// Notifications raised by a sign-out.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-logout-response.ts"
)]
pub struct AuthLogoutResponse {
    pub notifications: Vec<NotificationResponse>,
}
