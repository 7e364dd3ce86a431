use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::AssetType;

/// A fixed-income instrument (bond, treasury note, CDB...) owned by a user.
///
/// `id` and `registered_at` are `None` until the asset store persists it. After that
/// the id never changes and `registered_at` is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncome {
    pub id: Option<i64>,
    pub description: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub asset_type: AssetType,
    pub owner_id: Option<i64>,
    pub daily_yield: BigDecimal,
    pub monthly_yield: BigDecimal,
    pub maturity_date: NaiveDate,
    pub price: BigDecimal,
}

impl FixedIncome {
    pub fn new(
        description: String,
        owner_id: Option<i64>,
        daily_yield: BigDecimal,
        monthly_yield: BigDecimal,
        maturity_date: NaiveDate,
        price: BigDecimal,
    ) -> Self {
        Self {
            id: None,
            description,
            registered_at: None,
            asset_type: AssetType::FixedIncome,
            owner_id,
            daily_yield,
            monthly_yield,
            maturity_date,
            price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFixedIncome {
    pub description: String,
    #[serde(default)]
    pub user: Option<i64>,
    pub daily_yield: BigDecimal,
    pub monthly_yield: BigDecimal,
    pub maturity_date: NaiveDate,
    pub price: BigDecimal,
}

#[derive(Debug, Deserialize)]
pub struct FixedIncomeQuery {
    pub user: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedIncomeResponse {
    pub id: Option<i64>,
    pub description: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub asset_type: AssetType,
    pub user: Option<i64>,
    pub daily_yield: BigDecimal,
    pub monthly_yield: BigDecimal,
    pub maturity_date: NaiveDate,
    pub price: BigDecimal,
}

impl From<FixedIncome> for FixedIncomeResponse {
    fn from(asset: FixedIncome) -> Self {
        Self {
            id: asset.id,
            description: asset.description,
            registered_at: asset.registered_at,
            asset_type: asset.asset_type,
            user: asset.owner_id,
            daily_yield: asset.daily_yield,
            monthly_yield: asset.monthly_yield,
            maturity_date: asset.maturity_date,
            price: asset.price,
        }
    }
}
