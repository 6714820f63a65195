use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use servicedesk_application::AssetInventory;
use servicedesk_application::notices;
use servicedesk_core::Principal;
use servicedesk_domain::NewAsset;
use servicedesk_infrastructure::CollectingNotifier;

use super::{ListQuery, rejected};
use crate::dto::{AssetListResponse, CreateAssetRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_assets_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Json<AssetListResponse> {
    let notifier = state.request_notifier();
    let inventory =
        state.asset_inventory(principal, notifier.clone(), state.strings_for(&headers));

    inventory.load().await;
    if let Some(query) = query.non_blank() {
        inventory.set_query(query).await;
    }

    Json(render(&inventory, &notifier).await)
}

pub async fn create_asset_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Json(payload): Json<CreateAssetRequest>,
) -> ApiResult<(StatusCode, Json<AssetListResponse>)> {
    let notifier = state.request_notifier();
    let input = match NewAsset::new(payload.name, payload.asset_type, payload.serial_number) {
        Ok(input) => input,
        Err(error) => {
            return Err(rejected(&notifier, "asset.create", notices::ASSET_ERROR, error));
        }
    };

    let inventory =
        state.asset_inventory(principal, notifier.clone(), state.strings_for(&headers));
    if let Err(error) = inventory.create(input).await {
        inventory.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }

    Ok((StatusCode::CREATED, Json(render(&inventory, &notifier).await)))
}

async fn render(inventory: &AssetInventory, notifier: &CollectingNotifier) -> AssetListResponse {
    let view = inventory.view(Utc::now()).await;
    inventory.teardown();
    AssetListResponse::from_view(view, notifier.drain())
}
