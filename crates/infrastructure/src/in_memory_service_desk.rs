use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use servicedesk_application::{AssetGateway, AssigneeSelection, TicketGateway, UserDirectory};
use servicedesk_core::{AppError, AppResult, Role, UserId};
use servicedesk_domain::{
    Asset, AssetId, AssetStatus, CatalogValue, EmailAddress, NewAsset, NewTicket, NewUser,
    SearchQuery, Ticket, TicketId, TicketPriority, TicketStatus, UserRecord, UserRef,
};
use tokio::sync::RwLock;

mod seed;

pub use seed::{DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL};

#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredTicket {
    id: TicketId,
    title: String,
    description: String,
    priority: TicketPriority,
    category: String,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    creator_id: UserId,
    assignee_id: Option<UserId>,
}

#[derive(Debug, Clone)]
struct StoredAsset {
    id: AssetId,
    name: String,
    asset_type: String,
    serial_number: Option<String>,
    status: AssetStatus,
    created_at: DateTime<Utc>,
    assignee_id: Option<UserId>,
}

#[derive(Debug, Default)]
struct DeskState {
    users: HashMap<UserId, StoredUser>,
    tickets: HashMap<TicketId, StoredTicket>,
    assets: HashMap<AssetId, StoredAsset>,
}

impl DeskState {
    fn user_ref(&self, user_id: UserId) -> UserRef {
        self.users.get(&user_id).map_or_else(
            || UserRef {
                id: user_id,
                name: "Unknown user".to_owned(),
                email: String::new(),
            },
            |user| UserRef {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
            },
        )
    }

    fn ticket(&self, stored: &StoredTicket) -> Ticket {
        Ticket {
            id: stored.id,
            title: stored.title.clone(),
            description: stored.description.clone(),
            priority: CatalogValue::from(stored.priority),
            category: stored.category.clone(),
            status: CatalogValue::from(stored.status),
            created_at: stored.created_at,
            creator: self.user_ref(stored.creator_id),
            assignee: stored.assignee_id.map(|assignee_id| self.user_ref(assignee_id)),
        }
    }

    fn asset(&self, stored: &StoredAsset) -> Asset {
        Asset {
            id: stored.id,
            name: stored.name.clone(),
            asset_type: stored.asset_type.clone(),
            serial_number: stored.serial_number.clone(),
            status: CatalogValue::from(stored.status),
            created_at: stored.created_at,
            assignee: stored.assignee_id.map(|assignee_id| self.user_ref(assignee_id)),
        }
    }

    fn user_record(&self, stored: &StoredUser) -> UserRecord {
        let ticket_count = self
            .tickets
            .values()
            .filter(|ticket| ticket.creator_id == stored.id)
            .count();
        let asset_count = self
            .assets
            .values()
            .filter(|asset| asset.assignee_id == Some(stored.id))
            .count();

        UserRecord {
            id: stored.id,
            name: stored.name.clone(),
            email: stored.email.clone(),
            role: CatalogValue::from(stored.role),
            created_at: stored.created_at,
            ticket_count: u32::try_from(ticket_count).unwrap_or(u32::MAX),
            asset_count: u32::try_from(asset_count).unwrap_or(u32::MAX),
        }
    }

    fn tickets_where(&self, keep: impl Fn(&Ticket) -> bool) -> Vec<Ticket> {
        let mut listed: Vec<Ticket> = self
            .tickets
            .values()
            .map(|stored| self.ticket(stored))
            .filter(|ticket| keep(ticket))
            .collect();
        listed.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        listed
    }

    fn find_email(&self, email: &str) -> Option<&StoredUser> {
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
    }
}

/// In-memory service desk backend serving tickets, assets and users.
///
/// Lists are returned newest first. Ticket reads are scoped by caller role.
#[derive(Debug, Default)]
pub struct InMemoryServiceDesk {
    state: RwLock<DeskState>,
}

impl InMemoryServiceDesk {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DeskState::default()),
        }
    }

    /// Creates a backend holding a small demo organisation.
    #[must_use]
    pub fn with_demo_data() -> Self {
        Self {
            state: RwLock::new(seed::demo_state(Utc::now())),
        }
    }
}

#[async_trait]
impl TicketGateway for InMemoryServiceDesk {
    async fn fetch_tickets(&self, caller_id: UserId, caller_role: Role) -> AppResult<Vec<Ticket>> {
        let state = self.state.read().await;
        Ok(state.tickets_where(|ticket| match caller_role {
            Role::Admin => true,
            Role::EndUser => ticket.creator.id == caller_id,
        }))
    }

    async fn update_ticket_status(
        &self,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("ticket '{ticket_id}' does not exist")))?;

        ticket.status = status;
        Ok(())
    }

    async fn assign_ticket(&self, ticket_id: TicketId, assignee_id: &str) -> AppResult<()> {
        let selection = AssigneeSelection::from_transport(assignee_id)?;
        let mut state = self.state.write().await;

        let assignee = match selection {
            AssigneeSelection::Unassigned => None,
            AssigneeSelection::User(user_id) => {
                if !state.users.contains_key(&user_id) {
                    return Err(AppError::NotFound(format!(
                        "user '{user_id}' does not exist"
                    )));
                }
                Some(user_id)
            }
        };

        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("ticket '{ticket_id}' does not exist")))?;
        ticket.assignee_id = assignee;
        Ok(())
    }

    async fn search_tickets(&self, query: &str) -> AppResult<Vec<Ticket>> {
        let query = SearchQuery::new(query);
        if query.is_blank() {
            return Ok(Vec::new());
        }

        let state = self.state.read().await;
        Ok(state.tickets_where(|ticket| query.matches(ticket)))
    }

    async fn create_ticket(&self, creator: UserId, ticket: NewTicket) -> AppResult<Ticket> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&creator) {
            return Err(AppError::NotFound(format!(
                "user '{creator}' does not exist"
            )));
        }

        let stored = StoredTicket {
            id: TicketId::new(),
            title: ticket.title().to_owned(),
            description: ticket.description().to_owned(),
            priority: ticket.priority(),
            category: ticket.category().to_owned(),
            status: TicketStatus::Open,
            created_at: Utc::now(),
            creator_id: creator,
            assignee_id: None,
        };
        let created = state.ticket(&stored);
        state.tickets.insert(stored.id, stored);

        Ok(created)
    }
}

#[async_trait]
impl AssetGateway for InMemoryServiceDesk {
    async fn fetch_assets(&self) -> AppResult<Vec<Asset>> {
        let state = self.state.read().await;
        let mut listed: Vec<Asset> = state
            .assets
            .values()
            .map(|stored| state.asset(stored))
            .collect();
        listed.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(listed)
    }

    async fn create_asset(&self, asset: NewAsset) -> AppResult<Asset> {
        let mut state = self.state.write().await;
        if let Some(serial) = asset.serial_number()
            && state
                .assets
                .values()
                .any(|stored| stored.serial_number.as_deref() == Some(serial))
        {
            return Err(AppError::Conflict(format!(
                "an asset with serial number '{serial}' already exists"
            )));
        }

        let stored = StoredAsset {
            id: AssetId::new(),
            name: asset.name().to_owned(),
            asset_type: asset.asset_type().to_owned(),
            serial_number: asset.serial_number().map(str::to_owned),
            status: AssetStatus::Available,
            created_at: Utc::now(),
            assignee_id: None,
        };
        let created = state.asset(&stored);
        state.assets.insert(stored.id, stored);

        Ok(created)
    }
}

#[async_trait]
impl UserDirectory for InMemoryServiceDesk {
    async fn fetch_users(&self) -> AppResult<Vec<UserRecord>> {
        let state = self.state.read().await;
        let mut listed: Vec<UserRecord> = state
            .users
            .values()
            .map(|stored| state.user_record(stored))
            .collect();
        listed.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(listed)
    }

    async fn update_user_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        user.role = role;
        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<UserRecord> {
        let mut state = self.state.write().await;
        if state.find_email(user.email()).is_some() {
            return Err(AppError::Conflict(format!(
                "a user with email '{}' already exists",
                user.email()
            )));
        }

        let stored = StoredUser {
            id: UserId::new(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            role: user.role(),
            created_at: Utc::now(),
        };
        let created = state.user_record(&stored);
        state.users.insert(stored.id, stored);

        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let email = EmailAddress::new(email)?;
        let state = self.state.read().await;
        Ok(state
            .find_email(email.as_str())
            .map(|stored| state.user_record(stored)))
    }
}
