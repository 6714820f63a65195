use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use servicedesk_application::navigation_view;
use tower_sessions::Session;

use crate::auth::session_principal;
use crate::dto::NavigationResponse;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub path: Option<String>,
}

pub async fn navigation_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<NavigationResponse>> {
    let restored = session_principal(&session).await?;
    let current = state.sessions.current(restored.as_ref());
    let path = query.path.unwrap_or_else(|| "/".to_owned());

    Ok(Json(NavigationResponse::from(navigation_view(
        current.principal(),
        &path,
    ))))
}
