use serde::Serialize;
use servicedesk_core::Principal;
use servicedesk_domain::{Destination, QuickAction};

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Target page.
    pub destination: Destination,
    /// Link label.
    pub label: &'static str,
    /// Link target.
    pub path: &'static str,
    /// Whether the current page is this entry.
    pub active: bool,
}

/// Card linking to a section from the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeCard {
    /// Target page.
    pub destination: Destination,
    /// Card title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Button label.
    pub action: &'static str,
    /// Link target.
    pub path: &'static str,
}

/// Everything the page chrome needs for one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    /// Sidebar entries; `None` means no sidebar at all.
    pub sidebar: Option<Vec<NavEntry>>,
    /// Home page cards.
    pub home_cards: Vec<HomeCard>,
    /// Quick action buttons.
    pub quick_actions: Vec<QuickActionEntry>,
}

/// Quick action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickActionEntry {
    /// Action kind.
    pub action: QuickAction,
    /// Button label.
    pub label: &'static str,
}

/// Returns the sidebar for `principal`, or `None` when nobody is signed in.
#[must_use]
pub fn sidebar(principal: Option<&Principal>, current_path: &str) -> Option<Vec<NavEntry>> {
    let principal = principal?;
    let current = Destination::from_path(current_path);

    Some(
        Destination::all()
            .iter()
            .filter(|destination| destination.is_visible_to(principal.role()))
            .map(|destination| NavEntry {
                destination: *destination,
                label: destination.label(),
                path: destination.path(),
                active: current == Some(*destination),
            })
            .collect(),
    )
}

/// Returns the home page cards visible to `principal`.
#[must_use]
pub fn home_cards(principal: &Principal) -> Vec<HomeCard> {
    const CARDS: &[(Destination, &str, &str)] = &[
        (
            Destination::Tickets,
            "Create and manage support tickets",
            "View Tickets",
        ),
        (
            Destination::Assets,
            "Track hardware and equipment",
            "View Assets",
        ),
        (
            Destination::Users,
            "Manage user accounts and permissions",
            "Manage Users",
        ),
    ];

    CARDS
        .iter()
        .filter(|(destination, _, _)| destination.is_visible_to(principal.role()))
        .map(|&(destination, description, action)| HomeCard {
            destination,
            title: destination.label(),
            description,
            action,
            path: destination.path(),
        })
        .collect()
}

/// Returns the quick actions visible to `principal`.
#[must_use]
pub fn quick_actions(principal: &Principal) -> Vec<QuickActionEntry> {
    QuickAction::all()
        .iter()
        .filter(|action| action.is_visible_to(principal.role()))
        .map(|action| QuickActionEntry {
            action: *action,
            label: action.label(),
        })
        .collect()
}

/// Assembles the page chrome for `principal` at `current_path`.
#[must_use]
pub fn navigation_view(principal: Option<&Principal>, current_path: &str) -> NavigationView {
    NavigationView {
        sidebar: sidebar(principal, current_path),
        home_cards: principal.map(home_cards).unwrap_or_default(),
        quick_actions: principal.map(quick_actions).unwrap_or_default(),
    }
}
