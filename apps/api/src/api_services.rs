use std::sync::Arc;

use servicedesk_application::{Notifier, SessionRegistry, StringCatalog};
use servicedesk_core::AppError;
use servicedesk_infrastructure::{
    DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL, HttpServiceDeskGateway, InMemoryServiceDesk,
    TracingNotifier,
};
use tracing::info;

use crate::api_config::{ApiConfig, BackendConfig};
use crate::state::AppState;

pub fn build_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());
    let strings = StringCatalog::new(config.default_locale);
    let sessions = SessionRegistry::new();

    let state = match &config.backend {
        BackendConfig::Memory { seed_demo_data } => {
            let desk = if *seed_demo_data {
                info!(
                    admin = DEMO_ADMIN_EMAIL,
                    end_user = DEMO_USER_EMAIL,
                    "seeded in-memory service desk with demo accounts"
                );
                Arc::new(InMemoryServiceDesk::with_demo_data())
            } else {
                Arc::new(InMemoryServiceDesk::new())
            };

            AppState {
                tickets: desk.clone(),
                assets: desk.clone(),
                users: desk,
                notifier,
                sessions,
                strings,
                search_mode: config.search_mode,
                backend_name: "memory",
                frontend_url: config.frontend_url.clone(),
            }
        }
        BackendConfig::Http { base_url, timeout } => {
            let gateway = Arc::new(HttpServiceDeskGateway::new(base_url, *timeout)?);
            info!(%base_url, ?timeout, "using HTTP service desk backend");

            AppState {
                tickets: gateway.clone(),
                assets: gateway.clone(),
                users: gateway,
                notifier,
                sessions,
                strings,
                search_mode: config.search_mode,
                backend_name: "http",
                frontend_url: config.frontend_url.clone(),
            }
        }
    };

    Ok(state)
}
