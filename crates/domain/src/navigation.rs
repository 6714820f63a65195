use serde::{Deserialize, Serialize};
use servicedesk_core::Role;

/// Top-level page of the service desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Statistics and quick actions.
    Dashboard,
    /// Ticket list.
    Tickets,
    /// Asset inventory.
    Assets,
    /// User administration.
    Users,
    /// Desk settings.
    Settings,
}

impl Destination {
    /// Returns every destination in sidebar order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Destination] = &[
            Destination::Dashboard,
            Destination::Tickets,
            Destination::Assets,
            Destination::Users,
            Destination::Settings,
        ];

        ALL
    }

    /// Returns the route path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Tickets => "/tickets",
            Self::Assets => "/assets",
            Self::Users => "/users",
            Self::Settings => "/settings",
        }
    }

    /// Returns the sidebar label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tickets => "Tickets",
            Self::Assets => "Assets",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }

    /// Returns the role a principal must hold to open this page, if any.
    #[must_use]
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Dashboard | Self::Tickets | Self::Assets => None,
            Self::Users | Self::Settings => Some(Role::Admin),
        }
    }

    /// Returns whether `role` may open this page.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        match self.required_role() {
            None => true,
            Some(required) => required == role,
        }
    }

    /// Resolves a route path to its destination.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|destination| destination.path() == path.trim_end_matches('/'))
    }
}

/// Creation shortcut offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    /// Opens the ticket form.
    CreateTicket,
    /// Opens the asset form.
    AddAsset,
    /// Opens the user form.
    AddUser,
}

impl QuickAction {
    /// Returns every action in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[QuickAction] = &[
            QuickAction::CreateTicket,
            QuickAction::AddAsset,
            QuickAction::AddUser,
        ];

        ALL
    }

    /// Returns the stable token the client dispatches on.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTicket => "create_ticket",
            Self::AddAsset => "add_asset",
            Self::AddUser => "add_user",
        }
    }

    /// Returns the button label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateTicket => "Create Ticket",
            Self::AddAsset => "Add Asset",
            Self::AddUser => "Add User",
        }
    }

    /// Returns whether `role` may use this action.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        match self {
            Self::CreateTicket | Self::AddAsset => true,
            Self::AddUser => role.is_admin(),
        }
    }
}
