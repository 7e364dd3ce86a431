use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::db::{fixed_income_queries, user_queries};
use crate::errors::AppError;
use crate::store::duplicate_email;
use crate::models::{CreateUser, FixedIncome, User};
use crate::store::{AssetStore, UserStore};

#[derive(Clone)]
pub struct PgAssetStore {
    pool: PgPool,
}

impl PgAssetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetStore for PgAssetStore {
    async fn save(&self, asset: FixedIncome) -> Result<FixedIncome, AppError> {
        let row = match asset.id {
            None => fixed_income_queries::insert(&self.pool, &asset).await?,
            Some(id) => fixed_income_queries::update(&self.pool, id, &asset)
                .await?
                .ok_or_else(|| {
                    warn!("Fixed income {} disappeared before it could be saved", id);
                    AppError::AssetNotFound
                })?,
        };
        Ok(FixedIncome::try_from(row)?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FixedIncome>, AppError> {
        match fixed_income_queries::fetch_one(&self.pool, id).await? {
            Some(row) => Ok(Some(FixedIncome::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<FixedIncome>, AppError> {
        let rows = fixed_income_queries::fetch_by_user(&self.pool, owner_id).await?;
        let assets = rows
            .into_iter()
            .map(FixedIncome::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    async fn delete(&self, asset: &FixedIncome) -> Result<(), AppError> {
        let id = asset.id.ok_or(AppError::AssetNotFound)?;
        match fixed_income_queries::delete(&self.pool, id).await? {
            0 => Err(AppError::AssetNotFound),
            _ => Ok(()),
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn save(&self, input: CreateUser) -> Result<User, AppError> {
        let email = input.email.clone();
        user_queries::create(&self.pool, input).await.map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                warn!("Email {} is already registered", email);
                duplicate_email(&email)
            }
            other => AppError::Db(other),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(user_queries::fetch_one(&self.pool, id).await?)
    }
}
