use async_trait::async_trait;
use servicedesk_core::AppResult;
use servicedesk_domain::{Asset, NewAsset};

/// Backend port for the asset inventory.
#[async_trait]
pub trait AssetGateway: Send + Sync {
    /// Lists every asset in backend order.
    async fn fetch_assets(&self) -> AppResult<Vec<Asset>>;

    /// Registers a new asset and returns it as stored.
    async fn create_asset(&self, asset: NewAsset) -> AppResult<Asset>;
}
