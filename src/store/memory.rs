use super::AssetRepository;
use crate::core::asset::{Asset, AssetPatch, NewAsset};
use crate::core::error::{PatrimoineError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// In-memory repository backed by a `Vec` behind a mutex. Cloning shares
/// the same underlying list.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<Vec<Asset>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with already validated assets, e.g. a loaded book.
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(assets)),
        }
    }
}

#[async_trait]
impl AssetRepository for MemoryRepository {
    async fn list(&self) -> Vec<Asset> {
        self.inner.lock().await.clone()
    }

    async fn insert(&self, new_asset: NewAsset) -> Result<Asset> {
        let asset = Asset::try_from(new_asset)?;
        let mut assets = self.inner.lock().await;
        debug!(id = %asset.id(), label = asset.label(), "Asset INSERT");
        assets.push(asset.clone());
        Ok(asset)
    }

    async fn update_by_id(&self, id: Uuid, patch: AssetPatch) -> Result<Asset> {
        let mut assets = self.inner.lock().await;
        let slot = assets
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| PatrimoineError::NotFound {
                kind: "asset",
                key: id.to_string(),
            })?;
        let updated = slot.patched(patch)?;
        debug!(%id, "Asset UPDATE");
        *slot = updated.clone();
        Ok(updated)
    }

    async fn close_by_label(&self, label: &str, on: NaiveDate) -> Result<Asset> {
        let mut assets = self.inner.lock().await;
        let slot = assets
            .iter_mut()
            .find(|a| a.label() == label && a.closed_date().is_none())
            .ok_or_else(|| PatrimoineError::NotFound {
                kind: "open asset",
                key: label.to_string(),
            })?;
        slot.close(on);
        debug!(id = %slot.id(), label, %on, "Asset CLOSE");
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::{AccrualDay, ValuationMode, ValuationTerms};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_asset(label: &str, value: Decimal) -> NewAsset {
        NewAsset {
            label: label.to_string(),
            acquisition_value: value,
            acquisition_date: date(2022, 1, 1),
            terms: ValuationTerms::default(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = MemoryRepository::new();
        assert!(repo.list().await.is_empty());

        let first = repo.insert(new_asset("Maison", dec!(100000))).await.unwrap();
        let second = repo.insert(new_asset("Voiture", dec!(8000))).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert!(first.closed_date().is_none());

        let listed = repo.list().await;
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_input() {
        let repo = MemoryRepository::new();
        let err = repo.insert(new_asset("", dec!(1))).await.unwrap_err();
        assert_eq!(err, PatrimoineError::InvalidLabel);
        let err = repo.insert(new_asset("Dette", dec!(-1))).await.unwrap_err();
        assert!(matches!(err, PatrimoineError::InvalidNumeric { .. }));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id() {
        let repo = MemoryRepository::new();
        let asset = repo.insert(new_asset("Épargne", Decimal::ZERO)).await.unwrap();

        let updated = repo
            .update_by_id(
                asset.id(),
                AssetPatch {
                    label: Some("Livret A".to_string()),
                    accrual_amount: Some(dec!(200)),
                    accrual_day: Some(AccrualDay::Flag(true)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.label(), "Livret A");
        assert_eq!(updated.mode(), ValuationMode::Accruing { amount: dec!(200) });
        assert_eq!(repo.list().await, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = MemoryRepository::new();
        repo.insert(new_asset("Maison", dec!(1))).await.unwrap();
        let err = repo
            .update_by_id(Uuid::new_v4(), AssetPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PatrimoineError::NotFound { kind: "asset", .. }));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_asset_untouched() {
        let repo = MemoryRepository::new();
        let asset = repo.insert(new_asset("Maison", dec!(10))).await.unwrap();
        let result = repo
            .update_by_id(
                asset.id(),
                AssetPatch {
                    depreciation_rate_percent: Some(dec!(-1)),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_err());
        assert_eq!(repo.list().await, vec![asset]);
    }

    #[tokio::test]
    async fn test_close_by_label() {
        let repo = MemoryRepository::new();
        repo.insert(new_asset("Voiture", dec!(8000))).await.unwrap();
        repo.insert(new_asset("Voiture", dec!(12000))).await.unwrap();

        let closed = repo.close_by_label("Voiture", date(2024, 5, 1)).await.unwrap();
        assert_eq!(closed.acquisition_value(), dec!(8000));
        assert_eq!(closed.closed_date(), Some(date(2024, 5, 1)));

        // The next close picks the remaining open one
        let closed = repo.close_by_label("Voiture", date(2024, 6, 1)).await.unwrap();
        assert_eq!(closed.acquisition_value(), dec!(12000));

        let err = repo
            .close_by_label("Voiture", date(2024, 7, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PatrimoineError::NotFound { .. }));
        let err = repo
            .close_by_label("Bateau", date(2024, 7, 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "open asset not found: Bateau");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = MemoryRepository::from_assets(Vec::new());
        let other = repo.clone();
        other.insert(new_asset("Terrain", dec!(1))).await.unwrap();
        assert_eq!(repo.list().await.len(), 1);
    }
}
