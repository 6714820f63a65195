//! User administration view-model. Every operation requires an admin.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use servicedesk_core::{AppResult, Principal, Role, UserId};
use servicedesk_domain::{
    Badge, NewUser, SearchQuery, UserRecord, catalog_options, relative_age,
};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::access_gate::Placeholder;
use crate::collection_view::{CollectionView, ListPresentation, LoadOutcome, SelectField};
use crate::desk_ports::{Notifier, UserDirectory};
use crate::notices::{self, report_failure, report_success};
use crate::session_service::SessionBound;
use crate::strings::Strings;

/// One rendered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    /// Account id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role badge.
    pub role: Badge,
    /// Account age relative to render time.
    pub created: String,
    /// Tickets raised.
    pub ticket_count: u32,
    /// Assets held.
    pub asset_count: u32,
    /// Role selector.
    pub role_select: SelectField,
}

/// Rendered user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListView {
    /// Rows or the state replacing them.
    pub presentation: ListPresentation<UserRow>,
    /// Status line for loading, empty and no-match states.
    pub message: Option<&'static str>,
    /// Search box placeholder.
    pub search_placeholder: &'static str,
}

/// User list bound to an admin principal and one view lifetime.
pub struct UserAdmin {
    principal: RwLock<Principal>,
    directory: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    strings: &'static Strings,
    view: CollectionView<UserRecord>,
    query: RwLock<SearchQuery>,
}

impl UserAdmin {
    /// Creates an unloaded user list.
    #[must_use]
    pub fn new(
        principal: Principal,
        directory: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Self {
        Self {
            principal: RwLock::new(principal),
            directory,
            notifier,
            strings,
            view: CollectionView::new(),
            query: RwLock::new(SearchQuery::default()),
        }
    }

    /// Fetches every account. Non-admins are refused without a backend call.
    pub async fn load(&self) -> LoadOutcome {
        if let Err(error) = self.require_admin("users.fetch").await {
            return LoadOutcome::Failed(error);
        }

        let outcome = self.view.load(self.directory.fetch_users()).await;
        match &outcome {
            LoadOutcome::Applied => debug!("users loaded"),
            LoadOutcome::Cancelled => debug!("user fetch dropped after rescope or teardown"),
            LoadOutcome::Failed(error) => report_failure(
                self.notifier.as_ref(),
                "users.fetch",
                notices::USERS_LOAD_ERROR,
                error,
            ),
        }
        outcome
    }

    /// Replaces the search query.
    pub async fn set_query(&self, raw: impl Into<String>) {
        *self.query.write().await = SearchQuery::new(raw);
    }

    /// Clears the search query.
    pub async fn clear_query(&self) {
        self.set_query(String::new()).await;
    }

    /// Renders the list as of `now`. Non-admins get no rows, only the access-denied line.
    pub async fn view(&self, now: DateTime<Utc>) -> UserListView {
        if !self.principal.read().await.is_admin() {
            return UserListView {
                presentation: ListPresentation::Empty,
                message: Some(Placeholder::AccessDenied.message()),
                search_placeholder: self.strings.users.search_placeholder,
            };
        }

        let query = self.query.read().await.clone();
        let presentation = self
            .view
            .present(&query)
            .await
            .map_rows(|user| render_row(&user, now));

        UserListView {
            message: presentation.message(&self.strings.users),
            presentation,
            search_placeholder: self.strings.users.search_placeholder,
        }
    }

    /// Replaces the role of `user_id` and re-fetches the list.
    pub async fn change_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let acting = self.require_admin("user.role").await?;

        if let Err(error) = self.directory.update_user_role(user_id, role).await {
            report_failure(
                self.notifier.as_ref(),
                "user.role",
                notices::USER_ERROR,
                &error,
            );
            return Err(error);
        }

        info!(%user_id, role = role.as_str(), acting_user = %acting, "user role changed");
        self.load().await;
        report_success(self.notifier.as_ref(), notices::USER_UPDATED);
        Ok(())
    }

    /// Adds an account and refreshes the list.
    pub async fn create(&self, user: NewUser) -> AppResult<UserRecord> {
        let acting = self.require_admin("user.create").await?;

        let created = match self.directory.create_user(user).await {
            Ok(created) => created,
            Err(error) => {
                report_failure(
                    self.notifier.as_ref(),
                    "user.create",
                    notices::USER_ERROR,
                    &error,
                );
                return Err(error);
            }
        };

        info!(user_id = %created.id, acting_user = %acting, "user created");
        if !self.view.is_torn_down() {
            self.load().await;
        }
        report_success(self.notifier.as_ref(), notices::USER_CREATED);
        Ok(created)
    }

    /// Ends the list lifetime.
    pub fn teardown(&self) {
        self.view.teardown();
    }

    async fn require_admin(&self, operation: &str) -> AppResult<UserId> {
        let principal = self.principal.read().await.clone();
        match principal.require_role(Role::Admin) {
            Ok(()) => Ok(principal.id()),
            Err(error) => {
                warn!(user_id = %principal.id(), operation, "non-admin reached user administration");
                report_failure(
                    self.notifier.as_ref(),
                    operation,
                    notices::ACCESS_DENIED,
                    &error,
                );
                Err(error)
            }
        }
    }
}

#[async_trait]
impl SessionBound for UserAdmin {
    async fn rescope(&self, principal: Principal) {
        let admin = {
            let mut current = self.principal.write().await;
            if current.id() == principal.id() && current.role() == principal.role() {
                return;
            }
            let admin = principal.is_admin();
            *current = principal;
            admin
        };

        self.view.reset().await;
        if admin {
            self.load().await;
        } else {
            *self.query.write().await = SearchQuery::default();
            debug!("user list cleared for non-admin principal");
        }
    }

    fn teardown(&self) {
        UserAdmin::teardown(self);
    }

    fn lifetime(&self) -> CancellationToken {
        self.view.lifetime()
    }
}

fn render_row(user: &UserRecord, now: DateTime<Utc>) -> UserRow {
    UserRow {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.badge(),
        created: relative_age(user.created_at, now),
        ticket_count: user.ticket_count,
        asset_count: user.asset_count,
        role_select: SelectField {
            value: user.role.as_str().to_owned(),
            options: catalog_options::<Role>(),
        },
    }
}

#[cfg(test)]
mod tests;
