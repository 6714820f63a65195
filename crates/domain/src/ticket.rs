use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use servicedesk_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::catalog::{CatalogEntry, CatalogValue, TICKET_CATEGORIES, Tone};
use crate::user::UserRef;

/// Number of description characters shown in list rows.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 100;

/// Unique identifier for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a random ticket identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ticket identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TicketId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid ticket id '{value}': {error}")))
    }
}

/// Urgency chosen by the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Blocks part of the requester's work.
    High,
    /// Blocks the requester or many users.
    Critical,
}

impl CatalogEntry for TicketPriority {
    fn all() -> &'static [Self] {
        const ALL: &[TicketPriority] = &[
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
            TicketPriority::Critical,
        ];

        ALL
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Green,
            Self::Medium => Tone::Yellow,
            Self::High => Tone::Orange,
            Self::Critical => Tone::Red,
        }
    }
}

impl FromStr for TicketPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            AppError::Validation(format!("unknown ticket priority value '{value}'"))
        })
    }
}

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Raised and waiting for triage.
    Open,
    /// Picked up by the desk.
    InProgress,
    /// Fix delivered, waiting for confirmation.
    Resolved,
    /// No further work expected.
    Closed,
}

impl CatalogEntry for TicketStatus {
    fn all() -> &'static [Self] {
        const ALL: &[TicketStatus] = &[
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ];

        ALL
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Open => Tone::Blue,
            Self::InProgress => Tone::Yellow,
            Self::Resolved => Tone::Green,
            Self::Closed => Tone::Gray,
        }
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| AppError::Validation(format!("unknown ticket status value '{value}'")))
    }
}

/// Support ticket as last fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: TicketId,
    /// Short summary.
    pub title: String,
    /// Free-text problem description.
    pub description: String,
    /// Urgency as reported by the backend.
    pub priority: CatalogValue<TicketPriority>,
    /// Category label.
    pub category: String,
    /// Lifecycle state as reported by the backend.
    pub status: CatalogValue<TicketStatus>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Requester.
    pub creator: UserRef,
    /// Desk member working the ticket, if any.
    pub assignee: Option<UserRef>,
}

impl Ticket {
    /// Returns whether the ticket is still waiting for triage.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status.known() == Some(TicketStatus::Open)
    }

    /// Returns the description cut to the list excerpt length.
    #[must_use]
    pub fn description_excerpt(&self) -> String {
        excerpt(self.description.as_str(), DESCRIPTION_EXCERPT_CHARS)
    }
}

/// Returns `value` cut to `max_chars` characters with a trailing ellipsis.
#[must_use]
pub fn excerpt(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &value[..byte_index]),
        None => value.to_owned(),
    }
}

/// Validated input for raising a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    title: NonEmptyString,
    description: NonEmptyString,
    priority: TicketPriority,
    category: String,
}

impl NewTicket {
    /// Validates raw form values.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: TicketPriority,
        category: impl Into<String>,
    ) -> AppResult<Self> {
        let title = NonEmptyString::new(title.into().trim().to_owned())
            .map_err(|_| AppError::Validation("ticket title must not be empty".to_owned()))?;
        let description = NonEmptyString::new(description.into().trim().to_owned())
            .map_err(|_| AppError::Validation("ticket description must not be empty".to_owned()))?;

        let category = category.into();
        if !TICKET_CATEGORIES.contains(&category.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown ticket category '{category}'"
            )));
        }

        Ok(Self {
            title,
            description,
            priority,
            category,
        })
    }

    /// Returns the summary line.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the problem description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the requested urgency.
    #[must_use]
    pub fn priority(&self) -> TicketPriority {
        self.priority
    }

    /// Returns the category label.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::catalog::Badge;

    #[test]
    fn status_roundtrip_storage_value() {
        for status in TicketStatus::all() {
            assert_eq!(TicketStatus::from_str(status.as_str()), Ok(*status));
        }
    }

    #[test]
    fn unknown_priority_is_rejected_for_mutations() {
        assert!(TicketPriority::from_str("URGENT").is_err());
    }

    #[test]
    fn unknown_status_renders_with_default_badge() {
        let status = CatalogValue::<TicketStatus>::from_raw("ON_HOLD");
        assert_eq!(status.badge(), Badge::new("ON_HOLD", Tone::Gray));
    }

    #[test]
    fn priority_badges_match_catalogue() {
        assert_eq!(
            TicketPriority::Critical.badge(),
            Badge::new("Critical", Tone::Red)
        );
        assert_eq!(
            TicketStatus::InProgress.badge(),
            Badge::new("In Progress", Tone::Yellow)
        );
    }

    #[test]
    fn excerpt_keeps_short_values() {
        assert_eq!(excerpt("printer jam", 100), "printer jam");
    }

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        let value = "é".repeat(101);
        let cut = excerpt(&value, 100);

        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn excerpt_of_exact_length_has_no_ellipsis() {
        let value = "a".repeat(100);
        assert_eq!(excerpt(&value, 100), value);
    }

    #[test]
    fn new_ticket_rejects_unknown_category() {
        let result = NewTicket::new("VPN down", "Cannot connect", TicketPriority::High, "Plumbing");
        assert!(result.is_err());
    }

    #[test]
    fn new_ticket_rejects_blank_title() {
        let result = NewTicket::new("  ", "Cannot connect", TicketPriority::High, "Network");
        assert!(result.is_err());
    }
}
