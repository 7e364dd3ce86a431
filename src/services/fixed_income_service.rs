use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{AppError, USER_NOT_INFORMED};
use crate::models::FixedIncome;
use crate::store::AssetStore;

/// Enforces the fixed-income lifecycle rules before anything reaches the store.
#[derive(Clone)]
pub struct FixedIncomeService {
    store: Arc<dyn AssetStore>,
}

impl FixedIncomeService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, asset: FixedIncome) -> Result<FixedIncome, AppError> {
        if asset.owner_id.is_none() {
            warn!("Rejected fixed income '{}': no owner", asset.description);
            return Err(AppError::BusinessRule(USER_NOT_INFORMED.to_string()));
        }
        let saved = self.store.save(asset).await?;
        info!("Created fixed income {:?} for user {:?}", saved.id, saved.owner_id);
        Ok(saved)
    }

    /// Full overwrite: the stored record is only used to confirm existence.
    pub async fn update(&self, asset: FixedIncome) -> Result<FixedIncome, AppError> {
        self.ensure_exists(asset.id).await?;
        self.store.save(asset).await
    }

    pub async fn delete(&self, asset: &FixedIncome) -> Result<(), AppError> {
        self.ensure_exists(asset.id).await?;
        self.store.delete(asset).await?;
        info!("Deleted fixed income {:?}", asset.id);
        Ok(())
    }

    pub async fn fetch_one(&self, id: i64) -> Result<FixedIncome, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::AssetNotFound)
    }

    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<FixedIncome>, AppError> {
        self.store.find_by_owner(owner_id).await
    }

    async fn ensure_exists(&self, id: Option<i64>) -> Result<(), AppError> {
        let Some(id) = id else {
            warn!("Fixed income without id cannot be modified");
            return Err(AppError::AssetNotFound);
        };
        match self.store.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => {
                warn!("Fixed income {} not found", id);
                Err(AppError::AssetNotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ASSET_NOT_FOUND;
    use crate::models::AssetType;
    use crate::store::InMemoryAssetStore;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn setup() -> (Arc<InMemoryAssetStore>, FixedIncomeService) {
        let store = Arc::new(InMemoryAssetStore::new());
        let service = FixedIncomeService::new(store.clone());
        (store, service)
    }

    fn new_fixed_income(owner_id: Option<i64>, maturity: NaiveDate) -> FixedIncome {
        FixedIncome::new(
            "My fixed income".to_string(),
            owner_id,
            BigDecimal::from_str("0.01").unwrap(),
            BigDecimal::from(1),
            maturity,
            BigDecimal::from_str("5000.00").unwrap(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_registration_time() {
        let (store, service) = setup();
        let input = new_fixed_income(Some(7), date(2025, 12, 1));

        let saved = service.create(input.clone()).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert!(saved.registered_at.is_some());
        assert_eq!(saved.description, input.description);
        assert_eq!(saved.asset_type, AssetType::FixedIncome);
        assert_eq!(saved.owner_id, input.owner_id);
        assert_eq!(saved.daily_yield, input.daily_yield);
        assert_eq!(saved.monthly_yield, input.monthly_yield);
        assert_eq!(saved.maturity_date, input.maturity_date);
        assert_eq!(saved.price, input.price);
        assert_eq!(store.saved_records(), vec![input]);
    }

    #[tokio::test]
    async fn create_without_owner_is_a_business_rule_violation() {
        let (store, service) = setup();

        let err = service
            .create(new_fixed_income(None, date(2025, 1, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BusinessRule(_)));
        assert!(err.to_string().starts_with("User not informed"));
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_existing_asset() {
        let (store, service) = setup();
        let existing = store.seed(new_fixed_income(Some(7), date(2025, 1, 1)));

        let mut changed = existing.clone();
        changed.description = "Tesouro Direto".to_string();

        let updated = service.update(changed.clone()).await.unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.maturity_date, existing.maturity_date);
        assert_eq!(updated.description, "Tesouro Direto");
        assert_eq!(store.saved_records(), vec![changed]);
    }

    #[tokio::test]
    async fn update_without_id_fails() {
        let (store, service) = setup();

        let err = service
            .update(new_fixed_income(Some(7), date(2025, 1, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AssetNotFound));
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_asset_fails_the_same_way_twice() {
        let (store, service) = setup();
        let mut ghost = new_fixed_income(Some(7), date(2025, 1, 1));
        ghost.id = Some(1);

        for _ in 0..2 {
            let err = service.update(ghost.clone()).await.unwrap_err();
            assert!(matches!(err, AppError::AssetNotFound));
            assert_eq!(err.to_string(), ASSET_NOT_FOUND);
        }
        assert!(store.saved_records().is_empty());
        assert!(store.deleted_records().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_existing_asset() {
        let (store, service) = setup();
        let existing = store.seed(new_fixed_income(Some(7), date(2025, 1, 1)));

        service.delete(&existing).await.unwrap();

        assert_eq!(store.deleted_records(), vec![existing.clone()]);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_without_id_fails() {
        let (store, service) = setup();

        let err = service
            .delete(&new_fixed_income(Some(7), date(2025, 1, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AssetNotFound));
        assert!(store.deleted_records().is_empty());
    }

    #[tokio::test]
    async fn deleted_asset_can_no_longer_be_touched() {
        let (store, service) = setup();
        let existing = store.seed(new_fixed_income(Some(7), date(2025, 1, 1)));
        service.delete(&existing).await.unwrap();

        for _ in 0..2 {
            assert!(matches!(service.delete(&existing).await, Err(AppError::AssetNotFound)));
            assert!(matches!(service.update(existing.clone()).await, Err(AppError::AssetNotFound)));
        }
        assert_eq!(store.deleted_records().len(), 1);
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn fetch_one_and_list_by_owner() {
        let (store, service) = setup();
        let mine = store.seed(new_fixed_income(Some(7), date(2026, 1, 1)));
        store.seed(new_fixed_income(Some(8), date(2026, 1, 1)));

        assert_eq!(service.fetch_one(mine.id.unwrap()).await.unwrap(), mine);
        assert!(matches!(service.fetch_one(404).await, Err(AppError::AssetNotFound)));
        assert_eq!(service.list_by_owner(7).await.unwrap(), vec![mine]);
    }
}
