use axum::Json;
use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use servicedesk_core::Principal;

use crate::dto::DashboardResponse;
use crate::state::AppState;

pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Json<DashboardResponse> {
    let notifier = state.request_notifier();
    let view = state
        .dashboard(notifier.clone())
        .view(&principal, state.strings_for(&headers))
        .await;

    Json(DashboardResponse::from_view(view, notifier.drain()))
}
