use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::header::ACCEPT_LANGUAGE;
use servicedesk_application::{
    AssetGateway, AssetInventory, DashboardService, Notifier, SearchMode, SessionBound,
    SessionRegistry, StringCatalog, Strings, TicketBoard, TicketGateway, UserAdmin,
    UserDirectory, follow_session,
};
use servicedesk_core::{Principal, UserId};
use servicedesk_infrastructure::CollectingNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<dyn TicketGateway>,
    pub assets: Arc<dyn AssetGateway>,
    pub users: Arc<dyn UserDirectory>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: SessionRegistry,
    pub strings: StringCatalog,
    pub search_mode: SearchMode,
    pub backend_name: &'static str,
    pub frontend_url: String,
}

impl AppState {
    /// Collector for the notifications of one request, forwarding to the process notifier.
    pub fn request_notifier(&self) -> Arc<CollectingNotifier> {
        Arc::new(CollectingNotifier::forwarding_to(self.notifier.clone()))
    }

    /// String table for the request's `Accept-Language`.
    pub fn strings_for(&self, headers: &HeaderMap) -> &'static Strings {
        self.strings.strings_for_tag(
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok()),
        )
    }

    pub fn dashboard(&self, notifier: Arc<dyn Notifier>) -> DashboardService {
        DashboardService::new(self.tickets.clone(), self.assets.clone(), notifier)
    }

    pub fn ticket_board(
        &self,
        principal: Principal,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Arc<TicketBoard> {
        let user_id = principal.id();
        self.following_session(
            TicketBoard::new(
                principal,
                self.tickets.clone(),
                notifier,
                self.search_mode,
                strings,
            ),
            user_id,
        )
    }

    pub fn asset_inventory(
        &self,
        principal: Principal,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Arc<AssetInventory> {
        let user_id = principal.id();
        self.following_session(
            AssetInventory::new(principal, self.assets.clone(), notifier, strings),
            user_id,
        )
    }

    pub fn user_admin(
        &self,
        principal: Principal,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Arc<UserAdmin> {
        let user_id = principal.id();
        self.following_session(
            UserAdmin::new(principal, self.users.clone(), notifier, strings),
            user_id,
        )
    }

    /// Binds a request's view to the live session of its account until the view is torn down.
    fn following_session<V>(&self, view: V, user_id: UserId) -> Arc<V>
    where
        V: SessionBound + 'static,
    {
        let view = Arc::new(view);
        if let Some(sessions) = self.sessions.subscribe(user_id) {
            // Detached; the follower exits at teardown or sign-out.
            drop(follow_session(view.clone(), sessions));
        }
        view
    }
}
