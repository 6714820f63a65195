use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use servicedesk_application::{AccessGate, GateDecision, Notification, SessionState, notices};
use servicedesk_core::{AppError, Principal, Role};
use tower_sessions::Session;

use crate::auth::session_principal;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = admit(AccessGate::authenticated(), &state, &session).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = admit(AccessGate::requiring(Role::Admin), &state, &session).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Gates on the live account session, not on the principal stored in the cookie.
async fn admit(gate: AccessGate, state: &AppState, session: &Session) -> ApiResult<Principal> {
    let restored = session_principal(session).await?;
    gate_principal(gate, &state.sessions.current(restored.as_ref()))
}

pub(crate) fn gate_principal(gate: AccessGate, state: &SessionState) -> ApiResult<Principal> {
    match gate.decide(state) {
        GateDecision::Granted(principal) => Ok(principal.clone()),
        GateDecision::Blocked(placeholder) => {
            let message = placeholder.message().to_owned();
            match gate.required_role() {
                Some(_) if state.principal().is_some() => Err(ApiError::with_notifications(
                    AppError::Forbidden(message),
                    vec![Notification::error(notices::ACCESS_DENIED, None)],
                )),
                _ => Err(AppError::Unauthorized(message).into()),
            }
        }
    }
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.frontend_url;
        if origin != allowed_origin && !referer.starts_with(&allowed_origin) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use servicedesk_application::{AccessGate, SessionState};
    use servicedesk_core::{AppError, Principal, Role, UserId};

    use super::gate_principal;

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(Principal::new(
            UserId::new(),
            role,
            "Casey",
            "casey@corp.test",
        ))
    }

    #[test]
    fn anonymous_requests_are_unauthorized() {
        let result = gate_principal(AccessGate::authenticated(), &SessionState::Anonymous);

        let error = result.err().unwrap_or_else(|| panic!("anonymous admitted"));
        assert_eq!(
            error.error(),
            &AppError::Unauthorized("Please log in to continue".to_owned())
        );
    }

    #[test]
    fn end_user_is_forbidden_from_admin_routes_with_one_notification() {
        let result = gate_principal(AccessGate::requiring(Role::Admin), &signed_in(Role::EndUser));

        let error = result.err().unwrap_or_else(|| panic!("end user admitted"));
        assert!(matches!(error.error(), AppError::Forbidden(_)));
        assert_eq!(error.notifications().len(), 1);
    }

    #[test]
    fn admin_passes_admin_gate() {
        let result = gate_principal(AccessGate::requiring(Role::Admin), &signed_in(Role::Admin));
        assert!(result.is_ok());
    }
}
