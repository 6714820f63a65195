use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use servicedesk_application::notices::{self, report_failure};
use servicedesk_application::{AssigneeSelection, SearchMode, Strings, TicketBoard};
use servicedesk_core::{AppResult, Principal};
use servicedesk_domain::{NewTicket, TicketId, TicketPriority, TicketStatus, UserRecord};
use servicedesk_infrastructure::CollectingNotifier;

use super::{ListQuery, rejected};
use crate::dto::{
    AssignTicketRequest, CreateTicketRequest, TicketListResponse, UpdateTicketStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_tickets_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Json<TicketListResponse> {
    let notifier = state.request_notifier();
    let strings = state.strings_for(&headers);
    let board = open_board(&state, principal, notifier.clone(), strings).await;

    board.set_query(query.query.unwrap_or_default()).await;
    if state.search_mode == SearchMode::Local {
        board.load().await;
    }

    Json(render(&board, &notifier).await)
}

pub async fn create_ticket_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Json(payload): Json<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<TicketListResponse>)> {
    let notifier = state.request_notifier();
    let input = match new_ticket(payload) {
        Ok(input) => input,
        Err(error) => {
            return Err(rejected(&notifier, "ticket.create", notices::TICKET_ERROR, error));
        }
    };

    let strings = state.strings_for(&headers);
    let board = open_board(&state, principal, notifier.clone(), strings).await;
    if let Err(error) = board.create(input).await {
        board.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }

    Ok((StatusCode::CREATED, Json(render(&board, &notifier).await)))
}

pub async fn update_ticket_status_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
    Query(query): Query<ListQuery>,
    Json(payload): Json<UpdateTicketStatusRequest>,
) -> ApiResult<Json<TicketListResponse>> {
    let notifier = state.request_notifier();
    let (ticket_id, status) = match parse_status_change(&ticket_id, &payload.status) {
        Ok(parsed) => parsed,
        Err(error) => {
            return Err(rejected(&notifier, "ticket.status", notices::TICKET_ERROR, error));
        }
    };

    let strings = state.strings_for(&headers);
    let board = open_board(&state, principal, notifier.clone(), strings).await;
    if let Err(error) = board.change_status(ticket_id, status).await {
        board.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }
    if let Some(query) = query.non_blank() {
        board.set_query(query).await;
    }

    Ok(Json(render(&board, &notifier).await))
}

pub async fn assign_ticket_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
    Query(query): Query<ListQuery>,
    Json(payload): Json<AssignTicketRequest>,
) -> ApiResult<Json<TicketListResponse>> {
    let notifier = state.request_notifier();
    let parsed = TicketId::from_str(&ticket_id).and_then(|ticket_id| {
        AssigneeSelection::from_option_value(payload.assignee.trim())
            .map(|selection| (ticket_id, selection))
    });
    let (ticket_id, selection) = match parsed {
        Ok(parsed) => parsed,
        Err(error) => {
            return Err(rejected(&notifier, "ticket.assign", notices::TICKET_ERROR, error));
        }
    };

    let strings = state.strings_for(&headers);
    let board = open_board(&state, principal, notifier.clone(), strings).await;
    if let Err(error) = board.assign(ticket_id, selection).await {
        board.teardown();
        return Err(ApiError::with_notifications(error, notifier.drain()));
    }
    if let Some(query) = query.non_blank() {
        board.set_query(query).await;
    }

    Ok(Json(render(&board, &notifier).await))
}

/// Builds a board for one request. Admins also get the assignee candidates.
async fn open_board(
    state: &AppState,
    principal: Principal,
    notifier: Arc<CollectingNotifier>,
    strings: &'static Strings,
) -> Arc<TicketBoard> {
    let is_admin = principal.is_admin();
    let board = state.ticket_board(principal, notifier.clone(), strings);

    if is_admin {
        match state.users.fetch_users().await {
            Ok(users) => {
                board
                    .set_assignee_candidates(users.iter().map(UserRecord::to_ref).collect())
                    .await;
            }
            Err(error) => report_failure(
                notifier.as_ref(),
                "tickets.assignees",
                notices::USERS_LOAD_ERROR,
                &error,
            ),
        }
    }

    board
}

async fn render(board: &TicketBoard, notifier: &CollectingNotifier) -> TicketListResponse {
    let view = board.view(Utc::now()).await;
    board.teardown();
    TicketListResponse::from_view(view, notifier.drain())
}

fn parse_status_change(ticket_id: &str, status: &str) -> AppResult<(TicketId, TicketStatus)> {
    Ok((TicketId::from_str(ticket_id)?, TicketStatus::from_str(status.trim())?))
}

fn new_ticket(payload: CreateTicketRequest) -> AppResult<NewTicket> {
    let priority = TicketPriority::from_str(payload.priority.trim())?;

    NewTicket::new(
        payload.title,
        payload.description,
        priority,
        payload.category,
    )
}
