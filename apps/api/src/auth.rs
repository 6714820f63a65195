use axum::Json;
use axum::extract::{Extension, State};
use servicedesk_application::notices::{self, report_failure, report_success};
use servicedesk_core::{AppError, AppResult, Principal};
use tower_sessions::Session;
use tracing::info;

use crate::dto::{
    AuthLoginRequest, AuthLogoutResponse, AuthSessionResponse, UserIdentityResponse,
    notification_responses,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const SESSION_PRINCIPAL_KEY: &str = "principal";

pub async fn session_principal(session: &Session) -> ApiResult<Option<Principal>> {
    session
        .get::<Principal>(SESSION_PRINCIPAL_KEY)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to read session principal: {error}")).into()
        })
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AuthLoginRequest>,
) -> ApiResult<Json<AuthSessionResponse>> {
    let notifier = state.request_notifier();

    let principal = match resolve_principal(&state, &payload.email).await {
        Ok(principal) => principal,
        Err(error) => {
            report_failure(notifier.as_ref(), "auth.login", notices::LOGIN_ERROR, &error);
            return Err(ApiError::with_notifications(
                AppError::Unauthorized(notices::LOGIN_ERROR.to_owned()),
                notifier.drain(),
            ));
        }
    };

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to rotate session id: {error}")))?;
    session
        .insert(SESSION_PRINCIPAL_KEY, &principal)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;

    state.sessions.sign_in(principal.clone());
    info!(user_id = %principal.id(), role = %principal.role(), "signed in");
    report_success(notifier.as_ref(), notices::LOGIN_SUCCESS);

    Ok(Json(AuthSessionResponse {
        user: UserIdentityResponse::from(&principal),
        notifications: notification_responses(notifier.drain()),
    }))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<AuthLogoutResponse>> {
    let principal = session_principal(&session).await?;

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    let notifier = state.request_notifier();
    if let Some(principal) = principal {
        state.sessions.sign_out(principal.id());
        info!(user_id = %principal.id(), "signed out");
        report_success(notifier.as_ref(), notices::LOGOUT_SUCCESS);
    }

    Ok(Json(AuthLogoutResponse {
        notifications: notification_responses(notifier.drain()),
    }))
}

pub async fn me_handler(Extension(principal): Extension<Principal>) -> Json<UserIdentityResponse> {
    Json(UserIdentityResponse::from(&principal))
}

/// Looks up the account behind `email` and builds the session principal.
pub(crate) async fn resolve_principal(state: &AppState, email: &str) -> AppResult<Principal> {
    let user = state
        .users
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("no account for '{}'", email.trim())))?;

    let role = user.role.known().ok_or_else(|| {
        AppError::Forbidden(format!(
            "account '{}' has unrecognised role '{}'",
            user.email,
            user.role.as_str()
        ))
    })?;

    Ok(Principal::new(user.id, role, user.name, user.email))
}
