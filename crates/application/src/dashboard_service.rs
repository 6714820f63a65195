//! Home page statistics.

use std::sync::Arc;

use serde::Serialize;
use servicedesk_core::{AppResult, Principal};
use tracing::{debug, error};

use crate::desk_ports::{AssetGateway, Notification, Notifier, TicketGateway};
use crate::notices;
use crate::strings::Strings;

/// Counters behind the statistics cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    /// Tickets visible to the principal.
    pub total_tickets: usize,
    /// Visible tickets in the `OPEN` state.
    pub open_tickets: usize,
    /// Every asset.
    pub total_assets: usize,
    /// Assets in the `ASSIGNED` state.
    pub assigned_assets: usize,
}

/// One statistics card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    /// Card title.
    pub title: &'static str,
    /// Headline number.
    pub value: usize,
    /// Line under the number.
    pub caption: String,
}

/// Rendered dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Raw counters.
    pub stats: DashboardStats,
    /// Cards in display order.
    pub cards: Vec<StatCard>,
}

/// Application service computing dashboard statistics.
#[derive(Clone)]
pub struct DashboardService {
    tickets: Arc<dyn TicketGateway>,
    assets: Arc<dyn AssetGateway>,
    notifier: Arc<dyn Notifier>,
}

impl DashboardService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        tickets: Arc<dyn TicketGateway>,
        assets: Arc<dyn AssetGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tickets,
            assets,
            notifier,
        }
    }

    /// Fetches tickets and assets concurrently and renders the cards.
    ///
    /// On failure every counter is zero and one notification is sent.
    pub async fn view(&self, principal: &Principal, strings: &'static Strings) -> DashboardView {
        let stats = match self.stats(principal).await {
            Ok(stats) => stats,
            Err(failure) => {
                error!(user_id = %principal.id(), error = %failure, "failed to load dashboard statistics");
                self.notifier.notify(Notification::error(
                    notices::DASHBOARD_LOAD_ERROR,
                    Some(notices::DASHBOARD_LOAD_HINT.to_owned()),
                ));
                DashboardStats::default()
            }
        };

        DashboardView {
            stats,
            cards: render_cards(stats, strings),
        }
    }

    async fn stats(&self, principal: &Principal) -> AppResult<DashboardStats> {
        let (tickets, assets) = tokio::try_join!(
            self.tickets.fetch_tickets(principal.id(), principal.role()),
            self.assets.fetch_assets(),
        )?;

        let stats = DashboardStats {
            total_tickets: tickets.len(),
            open_tickets: tickets.iter().filter(|ticket| ticket.is_open()).count(),
            total_assets: assets.len(),
            assigned_assets: assets.iter().filter(|asset| asset.is_assigned()).count(),
        };
        debug!(user_id = %principal.id(), ?stats, "dashboard statistics computed");
        Ok(stats)
    }
}

fn render_cards(stats: DashboardStats, strings: &Strings) -> Vec<StatCard> {
    let text = &strings.dashboard;
    let pick = |count: usize, none: &str, some: String| {
        if count == 0 { none.to_owned() } else { some }
    };

    vec![
        StatCard {
            title: text.total_tickets,
            value: stats.total_tickets,
            caption: pick(
                stats.total_tickets,
                text.no_tickets_yet,
                format!("{} {}", stats.open_tickets, text.open_suffix),
            ),
        },
        StatCard {
            title: text.open_tickets,
            value: stats.open_tickets,
            caption: pick(
                stats.open_tickets,
                text.no_open_tickets,
                text.requires_attention.to_owned(),
            ),
        },
        StatCard {
            title: text.total_assets,
            value: stats.total_assets,
            caption: pick(
                stats.total_assets,
                text.no_assets_yet,
                text.hardware_and_software.to_owned(),
            ),
        },
        StatCard {
            title: text.assigned_assets,
            value: stats.assigned_assets,
            caption: pick(
                stats.assigned_assets,
                text.no_assigned_assets,
                text.currently_in_use.to_owned(),
            ),
        },
    ]
}
