mod cors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use servicedesk_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/dashboard",
            get(handlers::dashboard::dashboard_handler),
        )
        .route(
            "/api/tickets",
            get(handlers::tickets::list_tickets_handler)
                .post(handlers::tickets::create_ticket_handler),
        )
        .route(
            "/api/tickets/{ticket_id}/status",
            put(handlers::tickets::update_ticket_status_handler),
        )
        .route(
            "/api/tickets/{ticket_id}/assignee",
            put(handlers::tickets::assign_ticket_handler),
        )
        .route(
            "/api/assets",
            get(handlers::assets::list_assets_handler)
                .post(handlers::assets::create_asset_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}/role",
            put(handlers::users::update_user_role_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_admin,
        ));

    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route(
            "/api/navigation",
            get(handlers::navigation::navigation_handler),
        )
        .merge(protected_routes)
        .merge(admin_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
