use std::str::FromStr;

use async_trait::async_trait;
use servicedesk_core::{AppResult, Role, UserId};
use servicedesk_domain::{NewTicket, Ticket, TicketId, TicketStatus};

/// Backend port for tickets.
#[async_trait]
pub trait TicketGateway: Send + Sync {
    /// Lists tickets visible to the caller: their own for end users, all for admins.
    async fn fetch_tickets(&self, caller_id: UserId, caller_role: Role) -> AppResult<Vec<Ticket>>;

    /// Moves a ticket to a new lifecycle state.
    async fn update_ticket_status(&self, ticket_id: TicketId, status: TicketStatus)
    -> AppResult<()>;

    /// Assigns a ticket. `assignee_id` is a user id, or the empty string to unassign.
    async fn assign_ticket(&self, ticket_id: TicketId, assignee_id: &str) -> AppResult<()>;

    /// Runs a server-side ticket search. An empty query yields no tickets.
    async fn search_tickets(&self, query: &str) -> AppResult<Vec<Ticket>>;

    /// Raises a ticket on behalf of `creator` and returns it as stored.
    async fn create_ticket(&self, creator: UserId, ticket: NewTicket) -> AppResult<Ticket>;
}

/// Assignee picked in the ticket assignment control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssigneeSelection {
    /// Nobody works the ticket.
    Unassigned,
    /// The given user works the ticket.
    User(UserId),
}

impl AssigneeSelection {
    /// Value the backend expects for "nobody".
    pub const UNASSIGNED_SENTINEL: &'static str = "";

    /// Option value the assignment control uses for "nobody".
    pub const UNASSIGNED_OPTION: &'static str = "unassigned";

    /// Returns the value passed to [`TicketGateway::assign_ticket`].
    #[must_use]
    pub fn to_transport(&self) -> String {
        match self {
            Self::Unassigned => Self::UNASSIGNED_SENTINEL.to_owned(),
            Self::User(user_id) => user_id.to_string(),
        }
    }

    /// Parses the value received by [`TicketGateway::assign_ticket`].
    pub fn from_transport(value: &str) -> AppResult<Self> {
        if value == Self::UNASSIGNED_SENTINEL {
            return Ok(Self::Unassigned);
        }

        UserId::from_str(value).map(Self::User)
    }

    /// Returns the option value shown in the assignment control.
    #[must_use]
    pub fn option_value(&self) -> String {
        match self {
            Self::Unassigned => Self::UNASSIGNED_OPTION.to_owned(),
            Self::User(user_id) => user_id.to_string(),
        }
    }

    /// Parses an option value submitted from the assignment control.
    pub fn from_option_value(value: &str) -> AppResult<Self> {
        if value == Self::UNASSIGNED_OPTION {
            return Ok(Self::Unassigned);
        }

        UserId::from_str(value).map(Self::User)
    }
}
