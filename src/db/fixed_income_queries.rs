use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{AssetType, FixedIncome};

// Row shape of fixed_income_assets. asset_type is converted to/from AssetType.
#[derive(Debug, Clone, FromRow)]
pub struct FixedIncomeRow {
    pub id: i64,
    pub description: String,
    pub registered_at: DateTime<Utc>,
    pub asset_type: String,
    pub user_id: i64,
    pub daily_yield: BigDecimal,
    pub monthly_yield: BigDecimal,
    pub maturity_date: NaiveDate,
    pub price: BigDecimal,
}

impl TryFrom<FixedIncomeRow> for FixedIncome {
    type Error = sqlx::Error;

    fn try_from(row: FixedIncomeRow) -> Result<Self, Self::Error> {
        let asset_type = row
            .asset_type
            .parse::<AssetType>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(FixedIncome {
            id: Some(row.id),
            description: row.description,
            registered_at: Some(row.registered_at),
            asset_type,
            owner_id: Some(row.user_id),
            daily_yield: row.daily_yield,
            monthly_yield: row.monthly_yield,
            maturity_date: row.maturity_date,
            price: row.price,
        })
    }
}

const COLUMNS: &str = "id, description, registered_at, asset_type, user_id,
                       daily_yield, monthly_yield, maturity_date, price";

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<FixedIncomeRow>, sqlx::Error> {
    sqlx::query_as::<_, FixedIncomeRow>(&format!(
        "SELECT {COLUMNS} FROM fixed_income_assets WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<FixedIncomeRow>, sqlx::Error> {
    sqlx::query_as::<_, FixedIncomeRow>(&format!(
        "SELECT {COLUMNS} FROM fixed_income_assets
         WHERE user_id = $1
         ORDER BY maturity_date ASC, id ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &PgPool, asset: &FixedIncome) -> Result<FixedIncomeRow, sqlx::Error> {
    sqlx::query_as::<_, FixedIncomeRow>(&format!(
        "INSERT INTO fixed_income_assets
            (description, registered_at, asset_type, user_id, daily_yield, monthly_yield, maturity_date, price)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {COLUMNS}"
    ))
    .bind(&asset.description)
    .bind(Utc::now())
    .bind(asset.asset_type.as_str())
    .bind(asset.owner_id)
    .bind(&asset.daily_yield)
    .bind(&asset.monthly_yield)
    .bind(asset.maturity_date)
    .bind(&asset.price)
    .fetch_one(pool)
    .await
}

// Overwrites every mutable column. registered_at is left as inserted.
pub async fn update(pool: &PgPool, id: i64, asset: &FixedIncome) -> Result<Option<FixedIncomeRow>, sqlx::Error> {
    sqlx::query_as::<_, FixedIncomeRow>(&format!(
        "UPDATE fixed_income_assets
         SET description = $2, asset_type = $3, user_id = $4, daily_yield = $5,
             monthly_yield = $6, maturity_date = $7, price = $8
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&asset.description)
    .bind(asset.asset_type.as_str())
    .bind(asset.owner_id)
    .bind(&asset.daily_yield)
    .bind(&asset.monthly_yield)
    .bind(asset.maturity_date)
    .bind(&asset.price)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fixed_income_assets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../migrations/20240101000001_create_fixed_income_assets.sql");

    // Scaled NUMERIC(p, s) columns would round prices and yields on insert.
    #[test]
    fn decimal_columns_keep_caller_scale() {
        for column in ["daily_yield", "monthly_yield", "price"] {
            let line = SCHEMA
                .lines()
                .find(|l| l.trim_start().starts_with(column))
                .unwrap_or_else(|| panic!("column {} missing", column));
            assert!(
                line.contains("NUMERIC NOT NULL"),
                "column {} must be unscaled NUMERIC: {}",
                column,
                line
            );
        }
    }
}
