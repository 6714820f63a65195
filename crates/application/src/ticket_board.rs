//! Ticket list view-model: scoped fetch, live filter and admin mutations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use servicedesk_core::{AppResult, Principal, Role};
use servicedesk_domain::{
    Badge, CatalogEntry, NewTicket, SearchQuery, SelectOption, Ticket, TicketId, TicketStatus, UserRef,
    catalog_options, relative_age,
};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::collection_view::{CollectionView, ListPresentation, LoadOutcome, SelectField};
use crate::desk_ports::{AssigneeSelection, Notifier, TicketGateway};
use crate::notices::{self, report_failure, report_success};
use crate::search_mode::SearchMode;
use crate::session_service::SessionBound;
use crate::strings::Strings;

/// Admin-only controls attached to a ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketControls {
    /// Lifecycle selector.
    pub status: SelectField,
    /// Assignee selector; `"unassigned"` stands for nobody.
    pub assignee: SelectField,
}

/// One rendered ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRow {
    /// Ticket id.
    pub id: TicketId,
    /// Title.
    pub title: String,
    /// Shortened description.
    pub excerpt: String,
    /// Priority badge.
    pub priority: Badge,
    /// Status badge.
    pub status: Badge,
    /// Category.
    pub category: String,
    /// Creation time relative to render time.
    pub created: String,
    /// Who raised the ticket.
    pub creator_name: String,
    /// Who works the ticket.
    pub assignee_name: Option<String>,
    /// Present only for admins.
    pub controls: Option<TicketControls>,
}

/// Rendered ticket list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketListView {
    /// Rows or the state replacing them.
    pub presentation: ListPresentation<TicketRow>,
    /// Status line for loading, empty and no-match states.
    pub message: Option<&'static str>,
    /// Search box placeholder.
    pub search_placeholder: &'static str,
}

/// Ticket list bound to one principal and one view lifetime.
pub struct TicketBoard {
    principal: RwLock<Principal>,
    gateway: Arc<dyn TicketGateway>,
    notifier: Arc<dyn Notifier>,
    search_mode: SearchMode,
    strings: &'static Strings,
    view: CollectionView<Ticket>,
    query: RwLock<SearchQuery>,
    assignee_candidates: RwLock<Vec<UserRef>>,
}

impl TicketBoard {
    /// Creates an unloaded board for `principal`.
    #[must_use]
    pub fn new(
        principal: Principal,
        gateway: Arc<dyn TicketGateway>,
        notifier: Arc<dyn Notifier>,
        search_mode: SearchMode,
        strings: &'static Strings,
    ) -> Self {
        Self {
            principal: RwLock::new(principal),
            gateway,
            notifier,
            search_mode,
            strings,
            view: CollectionView::new(),
            query: RwLock::new(SearchQuery::default()),
            assignee_candidates: RwLock::new(Vec::new()),
        }
    }

    /// Returns the principal the board is scoped to.
    pub async fn principal(&self) -> Principal {
        self.principal.read().await.clone()
    }

    /// Returns the current query.
    pub async fn query(&self) -> SearchQuery {
        self.query.read().await.clone()
    }

    /// Fetches the collection for the current principal and query.
    pub async fn load(&self) -> LoadOutcome {
        let principal = self.principal().await;
        let query = self.query().await;

        let outcome = if self.search_mode == SearchMode::Remote && !query.is_blank() {
            let scope = principal.clone();
            self.view
                .load_answering(&query, async {
                    let found = self.gateway.search_tickets(query.raw().trim()).await?;
                    Ok(visible_to(&scope, found))
                })
                .await
        } else {
            self.view
                .load(self.gateway.fetch_tickets(principal.id(), principal.role()))
                .await
        };

        match &outcome {
            LoadOutcome::Applied => debug!(user_id = %principal.id(), "tickets loaded"),
            LoadOutcome::Cancelled => debug!("ticket fetch dropped after rescope or teardown"),
            LoadOutcome::Failed(error) => report_failure(
                self.notifier.as_ref(),
                "tickets.fetch",
                notices::TICKETS_LOAD_ERROR,
                error,
            ),
        }
        outcome
    }

    /// Replaces the search query. Remote mode re-queries the backend.
    pub async fn set_query(&self, raw: impl Into<String>) {
        *self.query.write().await = SearchQuery::new(raw);
        if self.search_mode == SearchMode::Remote {
            self.load().await;
        }
    }

    /// Clears the search query, restoring the full collection.
    pub async fn clear_query(&self) {
        self.set_query(String::new()).await;
    }

    /// Supplies the people offered in the assignee selector.
    pub async fn set_assignee_candidates(&self, candidates: Vec<UserRef>) {
        *self.assignee_candidates.write().await = candidates;
    }

    /// Renders the list as of `now`.
    pub async fn view(&self, now: DateTime<Utc>) -> TicketListView {
        let principal = self.principal().await;
        let query = self.query().await;
        let presentation = match self.search_mode {
            SearchMode::Local => self.view.present(&query).await,
            SearchMode::Remote => self.view.present_unfiltered(&query).await,
        };

        let candidates = self.assignee_candidates.read().await.clone();
        let presentation = presentation.map_rows(|ticket| {
            self.row(&ticket, principal.role(), &candidates, now)
        });

        TicketListView {
            message: presentation.message(&self.strings.tickets),
            presentation,
            search_placeholder: self.strings.tickets.search_placeholder,
        }
    }

    /// Moves a ticket to `status` and re-fetches the list.
    pub async fn change_status(&self, ticket_id: TicketId, status: TicketStatus) -> AppResult<()> {
        self.require_admin("ticket.status").await?;

        if let Err(error) = self.gateway.update_ticket_status(ticket_id, status).await {
            report_failure(
                self.notifier.as_ref(),
                "ticket.status",
                notices::TICKET_ERROR,
                &error,
            );
            return Err(error);
        }

        info!(%ticket_id, status = status.as_str(), "ticket status changed");
        self.load().await;
        report_success(self.notifier.as_ref(), notices::TICKET_UPDATED);
        Ok(())
    }

    /// Assigns a ticket, or clears its assignee, and re-fetches the list.
    pub async fn assign(&self, ticket_id: TicketId, selection: AssigneeSelection) -> AppResult<()> {
        self.require_admin("ticket.assign").await?;

        let assignee_id = selection.to_transport();
        if let Err(error) = self.gateway.assign_ticket(ticket_id, &assignee_id).await {
            report_failure(
                self.notifier.as_ref(),
                "ticket.assign",
                notices::TICKET_ERROR,
                &error,
            );
            return Err(error);
        }

        info!(%ticket_id, assignee = %selection.option_value(), "ticket assignment changed");
        self.load().await;
        report_success(self.notifier.as_ref(), notices::TICKET_ASSIGNED);
        Ok(())
    }

    /// Raises a ticket for the current principal.
    pub async fn create(&self, ticket: NewTicket) -> AppResult<Ticket> {
        let creator = self.principal().await.id();

        let created = match self.gateway.create_ticket(creator, ticket).await {
            Ok(created) => created,
            Err(error) => {
                report_failure(
                    self.notifier.as_ref(),
                    "ticket.create",
                    notices::TICKET_ERROR,
                    &error,
                );
                return Err(error);
            }
        };

        info!(ticket_id = %created.id, user_id = %creator, "ticket created");
        if !self.view.is_torn_down() {
            self.load().await;
        }
        report_success(self.notifier.as_ref(), notices::TICKET_CREATED);
        Ok(created)
    }

    /// Ends the board lifetime.
    pub fn teardown(&self) {
        self.view.teardown();
    }

    async fn require_admin(&self, operation: &str) -> AppResult<()> {
        let principal = self.principal().await;
        if let Err(error) = principal.require_role(Role::Admin) {
            report_failure(
                self.notifier.as_ref(),
                operation,
                notices::ACCESS_DENIED,
                &error,
            );
            return Err(error);
        }
        Ok(())
    }

    fn row(
        &self,
        ticket: &Ticket,
        viewer_role: Role,
        candidates: &[UserRef],
        now: DateTime<Utc>,
    ) -> TicketRow {
        let controls = match viewer_role {
            Role::Admin => Some(self.controls(ticket, candidates)),
            Role::EndUser => None,
        };

        TicketRow {
            id: ticket.id,
            title: ticket.title.clone(),
            excerpt: ticket.description_excerpt(),
            priority: ticket.priority.badge(),
            status: ticket.status.badge(),
            category: ticket.category.clone(),
            created: relative_age(ticket.created_at, now),
            creator_name: ticket.creator.name.clone(),
            assignee_name: ticket.assignee.as_ref().map(|assignee| assignee.name.clone()),
            controls,
        }
    }

    fn controls(&self, ticket: &Ticket, candidates: &[UserRef]) -> TicketControls {
        let mut assignee_options = vec![SelectOption::new(
            AssigneeSelection::UNASSIGNED_OPTION,
            self.strings.common.unassigned,
        )];
        assignee_options.extend(
            candidates
                .iter()
                .map(|candidate| SelectOption::new(candidate.id.to_string(), candidate.name.as_str())),
        );
        if let Some(assignee) = &ticket.assignee
            && !candidates.iter().any(|candidate| candidate.id == assignee.id)
        {
            assignee_options.push(SelectOption::new(assignee.id.to_string(), assignee.name.as_str()));
        }

        let selected_assignee = ticket
            .assignee
            .as_ref()
            .map_or(AssigneeSelection::Unassigned, |assignee| {
                AssigneeSelection::User(assignee.id)
            });

        TicketControls {
            status: SelectField {
                value: ticket.status.as_str().to_owned(),
                options: catalog_options::<TicketStatus>(),
            },
            assignee: SelectField {
                value: selected_assignee.option_value(),
                options: assignee_options,
            },
        }
    }
}

#[async_trait]
impl SessionBound for TicketBoard {
    async fn rescope(&self, principal: Principal) {
        {
            let mut current = self.principal.write().await;
            if current.id() == principal.id() && current.role() == principal.role() {
                return;
            }
            *current = principal;
        }

        self.view.reset().await;
        self.load().await;
    }

    fn teardown(&self) {
        TicketBoard::teardown(self);
    }

    fn lifetime(&self) -> CancellationToken {
        self.view.lifetime()
    }
}

fn visible_to(principal: &Principal, tickets: Vec<Ticket>) -> Vec<Ticket> {
    match principal.role() {
        Role::Admin => tickets,
        Role::EndUser => tickets
            .into_iter()
            .filter(|ticket| ticket.creator.id == principal.id())
            .collect(),
    }
}
