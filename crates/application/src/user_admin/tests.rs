use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::Utc;
use servicedesk_core::{AppError, AppResult, Principal, Role, UserId};
use servicedesk_domain::{CatalogValue, NewUser, UserRecord};
use tokio::sync::Mutex;

use crate::access_gate::Placeholder;
use crate::collection_view::{ListPresentation, ListState, LoadOutcome};
use crate::desk_ports::{Notification, Notifier, Severity, UserDirectory};
use crate::notices;
use crate::session_service::SessionBound;
use crate::strings::{Locale, StringCatalog};

use super::UserAdmin;

#[derive(Default)]
struct FakeUserDirectory {
    users: Mutex<Vec<UserRecord>>,
    fetches: Mutex<usize>,
    role_updates: Mutex<Vec<(UserId, Role)>>,
    fail_update: AtomicBool,
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn fetch_users(&self) -> AppResult<Vec<UserRecord>> {
        *self.fetches.lock().await += 1;
        Ok(self.users.lock().await.clone())
    }

    async fn update_user_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(AppError::Conflict("user was removed".to_owned()));
        }
        self.role_updates.lock().await.push((user_id, role));
        if let Some(user) = self
            .users
            .lock()
            .await
            .iter_mut()
            .find(|user| user.id == user_id)
        {
            user.role = CatalogValue::from(role);
        }
        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<UserRecord> {
        let created = record(user.name(), user.email(), user.role());
        self.users.lock().await.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }
}

#[derive(Default)]
struct RecordingNotifier(StdMutex<Vec<Notification>>);

impl RecordingNotifier {
    fn recorded(&self) -> Vec<Notification> {
        self.0.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.0.lock() {
            notifications.push(notification);
        }
    }
}

fn record(name: &str, email: &str, role: Role) -> UserRecord {
    UserRecord {
        id: UserId::new(),
        name: name.to_owned(),
        email: email.to_owned(),
        role: CatalogValue::from(role),
        created_at: Utc::now(),
        ticket_count: 0,
        asset_count: 0,
    }
}

fn admin_view(
    role: Role,
    directory: Arc<FakeUserDirectory>,
    notifier: Arc<RecordingNotifier>,
) -> UserAdmin {
    UserAdmin::new(
        Principal::new(UserId::new(), role, "Morgan", "morgan@corp.test"),
        directory,
        notifier,
        StringCatalog::default().strings(Locale::En),
    )
}

#[tokio::test]
async fn end_user_never_reaches_directory() {
    let directory = Arc::new(FakeUserDirectory::default());
    let target = record("Jo", "jo@corp.test", Role::EndUser);
    let target_id = target.id;
    directory.users.lock().await.push(target);
    let notifier = Arc::new(RecordingNotifier::default());
    let users = admin_view(Role::EndUser, directory.clone(), notifier.clone());

    let loaded = users.load().await;
    let changed = users.change_role(target_id, Role::Admin).await;

    assert!(matches!(loaded, LoadOutcome::Failed(AppError::Forbidden(_))));
    assert!(matches!(changed, Err(AppError::Forbidden(_))));
    assert_eq!(*directory.fetches.lock().await, 0);
    assert!(directory.role_updates.lock().await.is_empty());
    assert!(
        notifier
            .recorded()
            .iter()
            .all(|notification| notification.message == notices::ACCESS_DENIED)
    );
}

#[tokio::test]
async fn role_change_refetches_and_shows_new_badge() {
    let directory = Arc::new(FakeUserDirectory::default());
    let target = record("Jo", "jo@corp.test", Role::EndUser);
    let target_id = target.id;
    directory.users.lock().await.push(target);
    let notifier = Arc::new(RecordingNotifier::default());
    let users = admin_view(Role::Admin, directory.clone(), notifier.clone());

    users.load().await;
    assert!(users.change_role(target_id, Role::Admin).await.is_ok());

    let view = users.view(Utc::now()).await;
    let row = &view.presentation.rows()[0];
    assert_eq!(row.role.label, "Admin");
    assert_eq!(row.role_select.value, "ADMIN");
    assert_eq!(row.role_select.options.len(), 2);
    assert_eq!(*directory.fetches.lock().await, 2);
    assert_eq!(notifier.recorded().len(), 1);
    assert_eq!(notifier.recorded()[0].message, notices::USER_UPDATED);
}

#[tokio::test]
async fn failed_role_change_notifies_once_with_detail() {
    let directory = Arc::new(FakeUserDirectory::default());
    directory.fail_update.store(true, Ordering::SeqCst);
    let notifier = Arc::new(RecordingNotifier::default());
    let users = admin_view(Role::Admin, directory.clone(), notifier.clone());
    users.load().await;

    let result = users.change_role(UserId::new(), Role::Admin).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(*directory.fetches.lock().await, 1);
    let notifications = notifier.recorded();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].detail.as_deref(), Some("user was removed"));
}

#[tokio::test]
async fn search_matches_name_or_email() {
    let directory = Arc::new(FakeUserDirectory::default());
    directory.users.lock().await.extend([
        record("Jo Park", "jo@corp.test", Role::EndUser),
        record("Sam Lee", "helpdesk@corp.test", Role::Admin),
    ]);
    let users = admin_view(
        Role::Admin,
        directory,
        Arc::new(RecordingNotifier::default()),
    );
    users.load().await;

    users.set_query("HELPDESK").await;
    let view = users.view(Utc::now()).await;

    assert_eq!(view.presentation.rows().len(), 1);
    assert_eq!(view.presentation.rows()[0].name, "Sam Lee");
}

#[tokio::test]
async fn create_requires_admin_and_refreshes() {
    let directory = Arc::new(FakeUserDirectory::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let users = admin_view(Role::Admin, directory, notifier.clone());
    users.load().await;

    let input = NewUser::new("Avery", "avery@corp.test", Role::EndUser)
        .unwrap_or_else(|error| panic!("input rejected: {error}"));
    let created = users
        .create(input)
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert_eq!(created.name, "Avery");
    assert_eq!(users.view(Utc::now()).await.presentation.rows().len(), 1);
    assert_eq!(notifier.recorded()[0].message, notices::USER_CREATED);
}

#[tokio::test]
async fn admin_downgraded_to_end_user_sees_no_accounts() {
    let directory = Arc::new(FakeUserDirectory::default());
    directory
        .users
        .lock()
        .await
        .push(record("Jo", "jo@corp.test", Role::EndUser));
    let users = admin_view(
        Role::Admin,
        directory.clone(),
        Arc::new(RecordingNotifier::default()),
    );
    users.load().await;
    users.set_query("jo").await;
    assert_eq!(users.view(Utc::now()).await.presentation.rows().len(), 1);

    let demoted = users.principal.read().await.with_role(Role::EndUser);
    users.rescope(demoted).await;
    let view = users.view(Utc::now()).await;

    assert!(view.presentation.rows().is_empty());
    assert_eq!(view.presentation, ListPresentation::Empty);
    assert_eq!(view.message, Some(Placeholder::AccessDenied.message()));
    assert_eq!(users.view.snapshot().await, ListState::Loading);
    assert!(users.query.read().await.is_blank());
    assert_eq!(*directory.fetches.lock().await, 1);
}

#[tokio::test]
async fn end_user_promoted_to_admin_loads_accounts() {
    let directory = Arc::new(FakeUserDirectory::default());
    directory
        .users
        .lock()
        .await
        .push(record("Jo", "jo@corp.test", Role::EndUser));
    let users = admin_view(
        Role::EndUser,
        directory.clone(),
        Arc::new(RecordingNotifier::default()),
    );
    assert!(users.view(Utc::now()).await.presentation.rows().is_empty());

    let promoted = users.principal.read().await.with_role(Role::Admin);
    users.rescope(promoted).await;

    assert_eq!(*directory.fetches.lock().await, 1);
    assert_eq!(users.view(Utc::now()).await.presentation.rows().len(), 1);
}
