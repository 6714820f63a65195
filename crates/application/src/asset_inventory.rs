//! Asset list view-model.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use servicedesk_core::{AppResult, Principal};
use servicedesk_domain::{Asset, AssetId, Badge, NewAsset, SearchQuery, relative_age};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::collection_view::{CollectionView, ListPresentation, LoadOutcome};
use crate::desk_ports::{AssetGateway, Notifier};
use crate::notices::{self, report_failure, report_success};
use crate::session_service::SessionBound;
use crate::strings::Strings;

/// One rendered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow {
    /// Asset id.
    pub id: AssetId,
    /// Name.
    pub name: String,
    /// Type from the asset type catalogue.
    pub asset_type: String,
    /// Serial number, when recorded.
    pub serial_number: Option<String>,
    /// Status badge.
    pub status: Badge,
    /// Current holder.
    pub assignee_name: Option<String>,
    /// Registration time relative to render time.
    pub created: String,
}

impl AssetRow {
    fn render(asset: &Asset, now: DateTime<Utc>) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            asset_type: asset.asset_type.clone(),
            serial_number: asset.serial_number.clone(),
            status: asset.status.badge(),
            assignee_name: asset.assignee.as_ref().map(|assignee| assignee.name.clone()),
            created: relative_age(asset.created_at, now),
        }
    }
}

/// Rendered asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetListView {
    /// Rows or the state replacing them.
    pub presentation: ListPresentation<AssetRow>,
    /// Status line for loading, empty and no-match states.
    pub message: Option<&'static str>,
    /// Search box placeholder.
    pub search_placeholder: &'static str,
}

/// Asset list bound to one view lifetime.
pub struct AssetInventory {
    principal: RwLock<Principal>,
    gateway: Arc<dyn AssetGateway>,
    notifier: Arc<dyn Notifier>,
    strings: &'static Strings,
    view: CollectionView<Asset>,
    query: RwLock<SearchQuery>,
}

impl AssetInventory {
    /// Creates an unloaded inventory.
    #[must_use]
    pub fn new(
        principal: Principal,
        gateway: Arc<dyn AssetGateway>,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Self {
        Self {
            principal: RwLock::new(principal),
            gateway,
            notifier,
            strings,
            view: CollectionView::new(),
            query: RwLock::new(SearchQuery::default()),
        }
    }

    /// Fetches every asset.
    pub async fn load(&self) -> LoadOutcome {
        let outcome = self.view.load(self.gateway.fetch_assets()).await;
        match &outcome {
            LoadOutcome::Applied => debug!("assets loaded"),
            LoadOutcome::Cancelled => debug!("asset fetch dropped after rescope or teardown"),
            LoadOutcome::Failed(error) => report_failure(
                self.notifier.as_ref(),
                "assets.fetch",
                notices::ASSETS_LOAD_ERROR,
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

    /// Renders the list as of `now`.
    pub async fn view(&self, now: DateTime<Utc>) -> AssetListView {
        let query = self.query.read().await.clone();
        let presentation = self
            .view
            .present(&query)
            .await
            .map_rows(|asset| AssetRow::render(&asset, now));

        AssetListView {
            message: presentation.message(&self.strings.assets),
            presentation,
            search_placeholder: self.strings.assets.search_placeholder,
        }
    }

    /// Registers an asset and refreshes the list.
    pub async fn create(&self, asset: NewAsset) -> AppResult<Asset> {
        let created = match self.gateway.create_asset(asset).await {
            Ok(created) => created,
            Err(error) => {
                report_failure(
                    self.notifier.as_ref(),
                    "asset.create",
                    notices::ASSET_ERROR,
                    &error,
                );
                return Err(error);
            }
        };

        let registered_by = self.principal.read().await.id();
        info!(asset_id = %created.id, user_id = %registered_by, "asset registered");
        if !self.view.is_torn_down() {
            self.load().await;
        }
        report_success(self.notifier.as_ref(), notices::ASSET_CREATED);
        Ok(created)
    }

    /// Ends the inventory lifetime.
    pub fn teardown(&self) {
        self.view.teardown();
    }
}

#[async_trait]
impl SessionBound for AssetInventory {
    async fn rescope(&self, principal: Principal) {
        {
            let mut current = self.principal.write().await;
            if current.id() == principal.id() && current.role() == principal.role() {
                return;
            }
            *current = principal;
        }

        self.view.reset().await;
        self.load().await;
    }

    fn teardown(&self) {
        AssetInventory::teardown(self);
    }

    fn lifetime(&self) -> CancellationToken {
        self.view.lifetime()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use servicedesk_core::{AppError, AppResult, Principal, Role, UserId};
    use servicedesk_domain::{Asset, AssetId, AssetStatus, CatalogValue, NewAsset, UserRef};
    use tokio::sync::Mutex;

    use super::AssetInventory;
    use crate::collection_view::ListPresentation;
    use crate::session_service::SessionBound;
    use crate::desk_ports::{AssetGateway, Notification, Notifier, Severity};
    use crate::notices;
    use crate::strings::{Locale, StringCatalog};

    #[derive(Default)]
    struct FakeAssetGateway {
        assets: Mutex<Vec<Asset>>,
        fetches: AtomicUsize,
        fail: AtomicBool,
    }

    #[async_trait]
    impl AssetGateway for FakeAssetGateway {
        async fn fetch_assets(&self) -> AppResult<Vec<Asset>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Internal("inventory offline".to_owned()));
            }
            Ok(self.assets.lock().await.clone())
        }

        async fn create_asset(&self, asset: NewAsset) -> AppResult<Asset> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Internal("inventory offline".to_owned()));
            }
            let created = Asset {
                id: AssetId::new(),
                name: asset.name().to_owned(),
                asset_type: asset.asset_type().to_owned(),
                serial_number: asset.serial_number().map(str::to_owned),
                status: CatalogValue::from(AssetStatus::Available),
                created_at: Utc::now(),
                assignee: None,
            };
            self.assets.lock().await.push(created.clone());
            Ok(created)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(StdMutex<Vec<Notification>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            if let Ok(mut notifications) = self.0.lock() {
                notifications.push(notification);
            }
        }
    }

    impl RecordingNotifier {
        fn recorded(&self) -> Vec<Notification> {
            self.0.lock().map(|guard| guard.clone()).unwrap_or_default()
        }
    }

    fn asset(name: &str, serial: Option<&str>, holder: Option<&str>, status: &str) -> Asset {
        Asset {
            id: AssetId::new(),
            name: name.to_owned(),
            asset_type: "Computer".to_owned(),
            serial_number: serial.map(str::to_owned),
            status: CatalogValue::from_raw(status),
            created_at: Utc::now() - Duration::days(2),
            assignee: holder.map(|name| UserRef {
                id: UserId::new(),
                name: name.to_owned(),
                email: "holder@corp.test".to_owned(),
            }),
        }
    }

    fn inventory(gateway: Arc<FakeAssetGateway>, notifier: Arc<RecordingNotifier>) -> AssetInventory {
        AssetInventory::new(
            Principal::new(UserId::new(), Role::EndUser, "Robin", "robin@corp.test"),
            gateway,
            notifier,
            StringCatalog::default().strings(Locale::En),
        )
    }

    #[tokio::test]
    async fn query_matches_serial_and_holder() {
        let gateway = Arc::new(FakeAssetGateway::default());
        *gateway.assets.lock().await = vec![
            asset("ThinkPad", Some("SN-4411"), None, "AVAILABLE"),
            asset("Dell 27", None, Some("Priya"), "ASSIGNED"),
        ];
        let inventory = inventory(gateway, Arc::new(RecordingNotifier::default()));
        inventory.load().await;

        inventory.set_query("sn-44").await;
        let by_serial = inventory.view(Utc::now()).await;
        inventory.set_query("priya").await;
        let by_holder = inventory.view(Utc::now()).await;

        assert_eq!(by_serial.presentation.rows()[0].name, "ThinkPad");
        assert_eq!(by_holder.presentation.rows()[0].name, "Dell 27");
        assert_eq!(by_holder.presentation.rows()[0].created, "2 days ago");
    }

    #[tokio::test]
    async fn unknown_status_renders_gray_badge_with_raw_value() {
        let gateway = Arc::new(FakeAssetGateway::default());
        *gateway.assets.lock().await = vec![asset("Projector", None, None, "LOST")];
        let inventory = inventory(gateway, Arc::new(RecordingNotifier::default()));
        inventory.load().await;

        let view = inventory.view(Utc::now()).await;
        let badge = &view.presentation.rows()[0].status;

        assert_eq!(badge.label, "LOST");
        assert_eq!(badge.tone.css_class(), "bg-gray-100 text-gray-800");
    }

    #[tokio::test]
    async fn empty_inventory_uses_asset_empty_message() {
        let inventory = inventory(
            Arc::new(FakeAssetGateway::default()),
            Arc::new(RecordingNotifier::default()),
        );
        inventory.load().await;

        let view = inventory.view(Utc::now()).await;
        assert_eq!(view.presentation, ListPresentation::Empty);
        assert_eq!(
            view.message,
            Some("No assets found. Add your first asset to get started.")
        );
    }

    #[tokio::test]
    async fn create_refreshes_and_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let inventory = inventory(Arc::new(FakeAssetGateway::default()), notifier.clone());
        inventory.load().await;

        let input = NewAsset::new("Label printer", "Printer", Some("LP-1".to_owned()))
            .unwrap_or_else(|error| panic!("input rejected: {error}"));
        assert!(inventory.create(input).await.is_ok());

        assert_eq!(inventory.view(Utc::now()).await.presentation.rows().len(), 1);
        let notifications = notifier.recorded();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, notices::ASSET_CREATED);
    }

    #[tokio::test]
    async fn failed_fetch_notifies_once() {
        let gateway = Arc::new(FakeAssetGateway::default());
        gateway.fail.store(true, Ordering::SeqCst);
        let notifier = Arc::new(RecordingNotifier::default());
        let inventory = inventory(gateway, notifier.clone());

        inventory.load().await;

        let notifications = notifier.recorded();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Error);
        assert_eq!(notifications[0].message, notices::ASSETS_LOAD_ERROR);
    }

    #[tokio::test]
    async fn rescope_reloads_when_only_the_role_changes() {
        let gateway = Arc::new(FakeAssetGateway::default());
        *gateway.assets.lock().await = vec![asset("ThinkPad", None, None, "AVAILABLE")];
        let inventory = inventory(gateway.clone(), Arc::new(RecordingNotifier::default()));
        inventory.load().await;

        let same = inventory.principal.read().await.clone();
        inventory.rescope(same.clone()).await;
        assert_eq!(gateway.fetches.load(Ordering::SeqCst), 1);

        inventory.rescope(same.with_role(Role::Admin)).await;
        assert_eq!(gateway.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(inventory.view(Utc::now()).await.presentation.rows().len(), 1);
    }
}
