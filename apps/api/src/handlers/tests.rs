use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use servicedesk_application::{
    AccessGate, AssetGateway, SearchMode, SessionRegistry, StringCatalog, TicketGateway,
    UserDirectory, notices,
};
use servicedesk_core::{AppError, AppResult, Principal, Role, UserId};
use servicedesk_domain::{Asset, NewAsset, NewTicket, Ticket, TicketId, TicketStatus};
use servicedesk_infrastructure::{
    DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL, InMemoryServiceDesk, TracingNotifier,
};

use super::ListQuery;
use super::assets::create_asset_handler;
use super::dashboard::dashboard_handler;
use super::tickets::{
    assign_ticket_handler, create_ticket_handler, list_tickets_handler,
    update_ticket_status_handler,
};
use super::users::{list_users_handler, update_user_role_handler};
use crate::dto::{
    AssignTicketRequest, CreateAssetRequest, CreateTicketRequest, ListStateResponse,
    UpdateTicketStatusRequest, UpdateUserRoleRequest,
};
use crate::state::AppState;

fn state_with(desk: Arc<InMemoryServiceDesk>, search_mode: SearchMode) -> AppState {
    AppState {
        tickets: desk.clone(),
        assets: desk.clone(),
        users: desk,
        notifier: Arc::new(TracingNotifier::new()),
        sessions: SessionRegistry::new(),
        strings: StringCatalog::default(),
        search_mode,
        backend_name: "memory",
        frontend_url: "http://localhost:3000".to_owned(),
    }
}

fn demo_state() -> AppState {
    state_with(
        Arc::new(InMemoryServiceDesk::with_demo_data()),
        SearchMode::Local,
    )
}

async fn principal(state: &AppState, email: &str) -> Principal {
    let principal = crate::auth::resolve_principal(state, email)
        .await
        .unwrap_or_else(|error| panic!("demo account missing: {error}"));
    state.sessions.sign_in(principal.clone());
    principal
}

fn search(query: &str) -> Query<ListQuery> {
    Query(ListQuery {
        query: Some(query.to_owned()),
    })
}

async fn first_ticket_id(state: &AppState, admin: &Principal) -> String {
    let Json(list) = list_tickets_handler(
        State(state.clone()),
        Extension(admin.clone()),
        HeaderMap::new(),
        Query(ListQuery::default()),
    )
    .await;

    list.rows
        .first()
        .map(|row| row.id.clone())
        .unwrap_or_else(|| panic!("demo desk has no tickets"))
}

#[tokio::test]
async fn admin_status_change_returns_refreshed_list() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;
    let ticket_id = first_ticket_id(&state, &admin).await;

    let result = update_ticket_status_handler(
        State(state.clone()),
        Extension(admin),
        HeaderMap::new(),
        Path(ticket_id.clone()),
        Query(ListQuery::default()),
        Json(UpdateTicketStatusRequest {
            status: "RESOLVED".to_owned(),
        }),
    )
    .await;

    let Json(list) = result.unwrap_or_else(|_| panic!("status change rejected"));
    let row = list
        .rows
        .iter()
        .find(|row| row.id == ticket_id)
        .unwrap_or_else(|| panic!("changed ticket missing from refreshed list"));
    assert_eq!(row.status.label, "Resolved");
    assert_eq!(list.notifications.len(), 1);
    assert_eq!(list.notifications[0].message, notices::TICKET_UPDATED);
}

#[tokio::test]
async fn end_user_status_change_is_forbidden_with_one_notification() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;
    let end_user = principal(&state, DEMO_USER_EMAIL).await;
    let ticket_id = first_ticket_id(&state, &admin).await;

    let result = update_ticket_status_handler(
        State(state.clone()),
        Extension(end_user),
        HeaderMap::new(),
        Path(ticket_id),
        Query(ListQuery::default()),
        Json(UpdateTicketStatusRequest {
            status: "CLOSED".to_owned(),
        }),
    )
    .await;

    let error = result
        .err()
        .unwrap_or_else(|| panic!("end user changed a ticket status"));
    assert!(matches!(error.error(), AppError::Forbidden(_)));
    assert_eq!(error.notifications().len(), 1);
    assert_eq!(error.notifications()[0].message, notices::ACCESS_DENIED);
}

#[tokio::test]
async fn unmatched_query_reports_no_matches_and_keeps_the_query() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let Json(list) = list_tickets_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        search("zzz"),
    )
    .await;

    assert_eq!(list.state, ListStateResponse::NoMatches);
    assert_eq!(list.query, "zzz");
    assert!(list.rows.is_empty());
    assert!(list.message.is_some());
}

#[tokio::test]
async fn remote_search_goes_through_the_gateway() {
    let state = state_with(
        Arc::new(InMemoryServiceDesk::with_demo_data()),
        SearchMode::Remote,
    );
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let Json(list) = list_tickets_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        search("vpn"),
    )
    .await;

    assert_eq!(list.state, ListStateResponse::Rows);
    assert_eq!(list.rows.len(), 1);
    assert_eq!(list.rows[0].title, "VPN disconnects every hour");
}

#[tokio::test]
async fn end_user_sees_own_tickets_without_controls() {
    let state = demo_state();
    let end_user = principal(&state, DEMO_USER_EMAIL).await;

    let Json(list) = list_tickets_handler(
        State(state),
        Extension(end_user),
        HeaderMap::new(),
        Query(ListQuery::default()),
    )
    .await;

    assert_eq!(list.rows.len(), 2);
    assert!(list.rows.iter().all(|row| row.controls.is_none()));
    assert!(list.notifications.is_empty());
}

#[tokio::test]
async fn admin_rows_offer_unassigned_first() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let Json(list) = list_tickets_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        Query(ListQuery::default()),
    )
    .await;

    let controls = list
        .rows
        .first()
        .and_then(|row| row.controls.clone())
        .unwrap_or_else(|| panic!("admin row without controls"));
    assert_eq!(controls.assignee.options[0].value, "unassigned");
    assert_eq!(controls.status.options.len(), 4);
}

#[tokio::test]
async fn assigning_to_unassigned_clears_the_assignee() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;
    let Json(before) = list_tickets_handler(
        State(state.clone()),
        Extension(admin.clone()),
        HeaderMap::new(),
        search("vpn"),
    )
    .await;
    let ticket_id = before.rows[0].id.clone();

    let Json(after) = assign_ticket_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        Path(ticket_id),
        search("vpn"),
        Json(AssignTicketRequest {
            assignee: "unassigned".to_owned(),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("assignment rejected"));

    assert_eq!(after.query, "vpn");
    assert_eq!(after.rows.len(), 1);
    assert_eq!(after.rows[0].assignee_name, None);
    assert_eq!(after.notifications[0].message, notices::TICKET_ASSIGNED);
}

#[tokio::test]
async fn creating_a_ticket_returns_created_with_the_new_row() {
    let state = demo_state();
    let end_user = principal(&state, DEMO_USER_EMAIL).await;

    let (status, Json(list)) = create_ticket_handler(
        State(state),
        Extension(end_user),
        HeaderMap::new(),
        Json(CreateTicketRequest {
            title: "Monitor flickers".to_owned(),
            description: "External monitor flickers when docked.".to_owned(),
            priority: "LOW".to_owned(),
            category: "Hardware".to_owned(),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("ticket creation rejected"));

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list.rows.len(), 3);
    assert!(list.rows.iter().any(|row| row.title == "Monitor flickers"));
    assert_eq!(list.notifications[0].message, notices::TICKET_CREATED);
}

#[tokio::test]
async fn malformed_ticket_id_is_rejected_before_the_backend() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let error = update_ticket_status_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        Path("not-a-ticket".to_owned()),
        Query(ListQuery::default()),
        Json(UpdateTicketStatusRequest {
            status: "OPEN".to_owned(),
        }),
    )
    .await
    .err()
    .unwrap_or_else(|| panic!("malformed id accepted"));

    assert!(matches!(error.error(), AppError::Validation(_)));
    assert_eq!(error.notifications().len(), 1);
    assert_eq!(error.notifications()[0].message, notices::TICKET_ERROR);
}

#[tokio::test]
async fn unknown_asset_type_is_rejected_with_one_notification() {
    let state = demo_state();
    let end_user = principal(&state, DEMO_USER_EMAIL).await;

    let error = create_asset_handler(
        State(state),
        Extension(end_user),
        HeaderMap::new(),
        Json(CreateAssetRequest {
            name: "Spare dock".to_owned(),
            asset_type: "Spaceship".to_owned(),
            serial_number: None,
        }),
    )
    .await
    .err()
    .unwrap_or_else(|| panic!("unknown asset type accepted"));

    assert!(matches!(error.error(), AppError::Validation(_)));
    assert_eq!(error.notifications().len(), 1);
}

#[tokio::test]
async fn role_change_is_visible_in_refreshed_user_list() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;
    let end_user = principal(&state, DEMO_USER_EMAIL).await;

    let Json(list) = update_user_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        HeaderMap::new(),
        Path(end_user.id().to_string()),
        Query(ListQuery::default()),
        Json(UpdateUserRoleRequest {
            role: "ADMIN".to_owned(),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("role change rejected"));

    assert_eq!(list.notifications[0].message, notices::USER_UPDATED);
    let promoted = principal(&state, DEMO_USER_EMAIL).await;
    assert_eq!(promoted.role(), Role::Admin);

    let Json(users) = list_users_handler(
        State(state),
        Extension(admin),
        HeaderMap::new(),
        search("jordan"),
    )
    .await;
    assert_eq!(users.rows.len(), 1);
}

#[tokio::test]
async fn dashboard_counts_the_demo_desk() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let Json(dashboard) = dashboard_handler(State(state), Extension(admin), HeaderMap::new()).await;

    assert_eq!(dashboard.total_tickets, 4);
    assert_eq!(dashboard.open_tickets, 1);
    assert_eq!(dashboard.total_assets, 4);
    assert_eq!(dashboard.assigned_assets, 2);
    assert_eq!(dashboard.cards.len(), 4);
    assert!(dashboard.notifications.is_empty());
}

struct UnreachableBackend;

fn unreachable_backend() -> AppError {
    AppError::Internal("connection refused".to_owned())
}

#[async_trait]
impl TicketGateway for UnreachableBackend {
    async fn fetch_tickets(
        &self,
        _caller_id: UserId,
        _caller_role: Role,
    ) -> AppResult<Vec<Ticket>> {
        Err(unreachable_backend())
    }

    async fn update_ticket_status(
        &self,
        _ticket_id: TicketId,
        _status: TicketStatus,
    ) -> AppResult<()> {
        Err(unreachable_backend())
    }

    async fn assign_ticket(&self, _ticket_id: TicketId, _assignee_id: &str) -> AppResult<()> {
        Err(unreachable_backend())
    }

    async fn search_tickets(&self, _query: &str) -> AppResult<Vec<Ticket>> {
        Err(unreachable_backend())
    }

    async fn create_ticket(&self, _creator: UserId, _ticket: NewTicket) -> AppResult<Ticket> {
        Err(unreachable_backend())
    }
}

#[async_trait]
impl AssetGateway for UnreachableBackend {
    async fn fetch_assets(&self) -> AppResult<Vec<Asset>> {
        Err(unreachable_backend())
    }

    async fn create_asset(&self, _asset: NewAsset) -> AppResult<Asset> {
        Err(unreachable_backend())
    }
}

fn unreachable_state() -> AppState {
    let desk = Arc::new(InMemoryServiceDesk::with_demo_data());
    let backend = Arc::new(UnreachableBackend);
    let users: Arc<dyn UserDirectory> = desk;

    AppState {
        tickets: backend.clone(),
        assets: backend,
        users,
        notifier: Arc::new(TracingNotifier::new()),
        sessions: SessionRegistry::new(),
        strings: StringCatalog::default(),
        search_mode: SearchMode::Local,
        backend_name: "memory",
        frontend_url: "http://localhost:3000".to_owned(),
    }
}

#[tokio::test]
async fn dashboard_failure_yields_zeros_and_one_hint() {
    let state = unreachable_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;

    let Json(dashboard) = dashboard_handler(State(state), Extension(admin), HeaderMap::new()).await;

    assert_eq!(dashboard.total_tickets, 0);
    assert_eq!(dashboard.assigned_assets, 0);
    assert_eq!(dashboard.notifications.len(), 1);
    assert_eq!(
        dashboard.notifications[0].detail.as_deref(),
        Some(notices::DASHBOARD_LOAD_HINT)
    );
}

#[tokio::test]
async fn failed_ticket_fetch_renders_empty_list_with_error_notification() {
    let state = unreachable_state();
    let end_user = principal(&state, DEMO_USER_EMAIL).await;

    let Json(list) = list_tickets_handler(
        State(state),
        Extension(end_user),
        HeaderMap::new(),
        Query(ListQuery::default()),
    )
    .await;

    assert_eq!(list.state, ListStateResponse::Empty);
    assert_eq!(list.notifications.len(), 1);
    assert_eq!(list.notifications[0].severity, "error");
    assert_eq!(list.notifications[0].message, notices::TICKETS_LOAD_ERROR);
}

async fn change_role(state: &AppState, admin: &Principal, target: UserId, role: &str) {
    update_user_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        HeaderMap::new(),
        Path(target.to_string()),
        Query(ListQuery::default()),
        Json(UpdateUserRoleRequest {
            role: role.to_owned(),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("role change to {role} rejected"));
}

#[tokio::test]
async fn role_change_applies_to_the_live_session_of_the_account() {
    let state = demo_state();
    let admin = principal(&state, DEMO_ADMIN_EMAIL).await;
    let stored = principal(&state, DEMO_USER_EMAIL).await;
    let admin_gate = AccessGate::requiring(Role::Admin);

    change_role(&state, &admin, stored.id(), "ADMIN").await;
    let live = state.sessions.current(Some(&stored));
    let promoted = crate::middleware::gate_principal(admin_gate, &live)
        .unwrap_or_else(|_| panic!("promoted account refused by admin gate"));
    assert_eq!(promoted.id(), stored.id());

    change_role(&state, &admin, stored.id(), "END_USER").await;
    let live = state.sessions.current(Some(&stored));
    let error = crate::middleware::gate_principal(admin_gate, &live)
        .err()
        .unwrap_or_else(|| panic!("demoted account passed admin gate"));
    assert!(matches!(error.error(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn signed_out_account_is_refused_despite_stored_principal() {
    let state = demo_state();
    let stored = principal(&state, DEMO_USER_EMAIL).await;

    assert!(state.sessions.sign_out(stored.id()).is_some());

    let live = state.sessions.current(Some(&stored));
    let error = crate::middleware::gate_principal(AccessGate::authenticated(), &live)
        .err()
        .unwrap_or_else(|| panic!("signed-out account admitted"));
    assert!(matches!(error.error(), AppError::Unauthorized(_)));
}
