use chrono::{DateTime, Duration, Utc};
use servicedesk_core::{Role, UserId};
use servicedesk_domain::{AssetId, AssetStatus, TicketId, TicketPriority, TicketStatus};

use super::{DeskState, StoredAsset, StoredTicket, StoredUser};

/// Email of the seeded administrator.
pub const DEMO_ADMIN_EMAIL: &str = "admin@servicedesk.local";
/// Email of the seeded end user who owns most demo tickets.
pub const DEMO_USER_EMAIL: &str = "jordan@servicedesk.local";

pub(super) fn demo_state(now: DateTime<Utc>) -> DeskState {
    let mut state = DeskState::default();

    let admin = user(
        &mut state,
        "Alex Admin",
        DEMO_ADMIN_EMAIL,
        Role::Admin,
        now - Duration::days(120),
    );
    let jordan = user(
        &mut state,
        "Jordan Lee",
        DEMO_USER_EMAIL,
        Role::EndUser,
        now - Duration::days(60),
    );
    let priya = user(
        &mut state,
        "Priya Shah",
        "priya@servicedesk.local",
        Role::EndUser,
        now - Duration::days(14),
    );

    ticket(
        &mut state,
        TicketSeed {
            title: "Laptop does not boot",
            description: "The laptop shows a black screen after the vendor logo. Tried a hard reset twice.",
            priority: TicketPriority::High,
            category: "Hardware",
            status: TicketStatus::Open,
            created_at: now - Duration::hours(3),
            creator: jordan,
            assignee: None,
        },
    );
    ticket(
        &mut state,
        TicketSeed {
            title: "VPN disconnects every hour",
            description: "Remote sessions drop roughly every sixty minutes and need a manual reconnect.",
            priority: TicketPriority::Medium,
            category: "Network",
            status: TicketStatus::InProgress,
            created_at: now - Duration::days(2),
            creator: jordan,
            assignee: Some(admin),
        },
    );
    ticket(
        &mut state,
        TicketSeed {
            title: "Access to finance share",
            description: "Need read access to the finance share for the quarterly report.",
            priority: TicketPriority::Low,
            category: "Access",
            status: TicketStatus::Resolved,
            created_at: now - Duration::days(9),
            creator: priya,
            assignee: Some(admin),
        },
    );
    ticket(
        &mut state,
        TicketSeed {
            title: "Printer on floor 2 jams",
            description: "Paper jams on every duplex job.",
            priority: TicketPriority::Critical,
            category: "Hardware",
            status: TicketStatus::Closed,
            created_at: now - Duration::days(40),
            creator: priya,
            assignee: None,
        },
    );

    asset(
        &mut state,
        ("ThinkPad T14", "Computer", Some("PF-2X91KQ")),
        AssetStatus::Assigned,
        now - Duration::days(90),
        Some(jordan),
    );
    asset(
        &mut state,
        ("Dell U2723QE", "Monitor", Some("CN-0H7J2P")),
        AssetStatus::Assigned,
        now - Duration::days(45),
        Some(priya),
    );
    asset(
        &mut state,
        ("HP LaserJet M404", "Printer", None),
        AssetStatus::UnderMaintenance,
        now - Duration::days(200),
        None,
    );
    asset(
        &mut state,
        ("Logitech MX Keys", "Keyboard", None),
        AssetStatus::Available,
        now - Duration::days(5),
        None,
    );

    state
}

fn user(
    state: &mut DeskState,
    name: &str,
    email: &str,
    role: Role,
    created_at: DateTime<Utc>,
) -> UserId {
    let id = UserId::new();
    state.users.insert(
        id,
        StoredUser {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            created_at,
        },
    );
    id
}

struct TicketSeed {
    title: &'static str,
    description: &'static str,
    priority: TicketPriority,
    category: &'static str,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    creator: UserId,
    assignee: Option<UserId>,
}

fn ticket(state: &mut DeskState, seed: TicketSeed) {
    let id = TicketId::new();
    state.tickets.insert(
        id,
        StoredTicket {
            id,
            title: seed.title.to_owned(),
            description: seed.description.to_owned(),
            priority: seed.priority,
            category: seed.category.to_owned(),
            status: seed.status,
            created_at: seed.created_at,
            creator_id: seed.creator,
            assignee_id: seed.assignee,
        },
    );
}

fn asset(
    state: &mut DeskState,
    (name, asset_type, serial_number): (&str, &str, Option<&str>),
    status: AssetStatus,
    created_at: DateTime<Utc>,
    assignee: Option<UserId>,
) {
    let id = AssetId::new();
    state.assets.insert(
        id,
        StoredAsset {
            id,
            name: name.to_owned(),
            asset_type: asset_type.to_owned(),
            serial_number: serial_number.map(str::to_owned),
            status,
            created_at,
            assignee_id: assignee,
        },
    );
}
