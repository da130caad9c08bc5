pub mod memory;

use crate::core::asset::{Asset, AssetPatch, NewAsset};
use crate::core::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub use memory::MemoryRepository;

/// Where possessions live. The valuation engine never talks to a repository;
/// callers list the assets and hand them over.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// All assets, open and closed, in insertion order.
    async fn list(&self) -> Vec<Asset>;

    /// Stores a new, open asset under a fresh id.
    async fn insert(&self, new_asset: NewAsset) -> Result<Asset>;

    /// Replaces the fields set in `patch` on the asset with this id.
    async fn update_by_id(&self, id: Uuid, patch: AssetPatch) -> Result<Asset>;

    /// Closes the first still-open asset carrying `label` as of `on`.
    async fn close_by_label(&self, label: &str, on: NaiveDate) -> Result<Asset>;
}
