use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CreateUser, FixedIncome, User};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAssetStore, InMemoryUserStore};
pub use postgres::{PgAssetStore, PgUserStore};

/// Persistence for fixed-income assets, keyed by store-assigned id.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Inserts when `asset.id` is `None` (assigning id and `registered_at`),
    /// otherwise overwrites the stored record with the given fields.
    async fn save(&self, asset: FixedIncome) -> Result<FixedIncome, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<FixedIncome>, AppError>;

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<FixedIncome>, AppError>;

    async fn delete(&self, asset: &FixedIncome) -> Result<(), AppError>;
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::Conflict(format!("Email already registered: {}", email))
}

/// User records. Emails are unique across users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn save(&self, input: CreateUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}
