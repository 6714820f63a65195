use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use servicedesk_application::UserAdmin;
use servicedesk_application::notices;
use servicedesk_core::{AppResult, Principal, Role, UserId};
use servicedesk_domain::NewUser;
use servicedesk_infrastructure::CollectingNotifier;
use tracing::info;

use super::{ListQuery, rejected};
use crate::dto::{CreateUserRequest, UpdateUserRoleRequest, UserListResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Json<UserListResponse> {
    let notifier = state.request_notifier();
    let admin = state.user_admin(principal, notifier.clone(), state.strings_for(&headers));

    admin.load().await;
    if let Some(query) = query.non_blank() {
        admin.set_query(query).await;
    }

    Json(render(&admin, &notifier).await)
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserListResponse>)> {
    let notifier = state.request_notifier();
    let input = Role::from_str(payload.role.trim())
        .and_then(|role| NewUser::new(payload.name, payload.email, role));
    let input = match input {
        Ok(input) => input,
        Err(error) => return Err(rejected(&notifier, "user.create", notices::USER_ERROR, error)),
    };

    let admin = state.user_admin(principal, notifier.clone(), state.strings_for(&headers));
    if let Err(error) = admin.create(input).await {
        admin.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }

    Ok((StatusCode::CREATED, Json(render(&admin, &notifier).await)))
}

pub async fn update_user_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> ApiResult<Json<UserListResponse>> {
    let notifier = state.request_notifier();
    let (user_id, role) = match parse_role_change(&user_id, &payload.role) {
        Ok(parsed) => parsed,
        Err(error) => return Err(rejected(&notifier, "user.role", notices::USER_ERROR, error)),
    };

    let admin = state.user_admin(principal, notifier.clone(), state.strings_for(&headers));
    if let Err(error) = admin.change_role(user_id, role).await {
        admin.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }
    if state.sessions.change_role(user_id, role) {
        info!(%user_id, role = role.as_str(), "live session rescoped");
    }
    if let Some(query) = query.non_blank() {
        admin.set_query(query).await;
    }

    Ok(Json(render(&admin, &notifier).await))
}

async fn render(admin: &UserAdmin, notifier: &CollectingNotifier) -> UserListResponse {
    let view = admin.view(Utc::now()).await;
    admin.teardown();
    UserListResponse::from_view(view, notifier.drain())
}

fn parse_role_change(user_id: &str, role: &str) -> AppResult<(UserId, Role)> {
    Ok((UserId::from_str(user_id)?, Role::from_str(role.trim())?))
}
