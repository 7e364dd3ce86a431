use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::errors::AppError;
use crate::models::{CreateUser, FixedIncome, User};
use crate::store::{duplicate_email, AssetStore, UserStore};

/// Process-local asset store. Every `save` and `delete` call is recorded,
/// including the ones that fail, so callers can check exactly what was sent.
#[derive(Default)]
pub struct InMemoryAssetStore {
    assets: DashMap<i64, FixedIncome>,
    next_id: AtomicI64,
    saved: Mutex<Vec<FixedIncome>>,
    deleted: Mutex<Vec<FixedIncome>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a persisted asset in place without recording a `save` call.
    pub fn seed(&self, asset: FixedIncome) -> FixedIncome {
        let mut asset = asset;
        let id = match asset.id {
            Some(id) => {
                self.next_id.fetch_max(id, Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        asset.id = Some(id);
        asset.registered_at.get_or_insert_with(Utc::now);
        self.assets.insert(id, asset.clone());
        asset
    }

    pub fn saved_records(&self) -> Vec<FixedIncome> {
        self.saved.lock().clone()
    }

    pub fn deleted_records(&self) -> Vec<FixedIncome> {
        self.deleted.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn save(&self, asset: FixedIncome) -> Result<FixedIncome, AppError> {
        self.saved.lock().push(asset.clone());

        let mut stored = asset;
        match stored.id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                stored.id = Some(id);
                stored.registered_at = Some(Utc::now());
                self.assets.insert(id, stored.clone());
            }
            Some(id) => {
                let mut entry = self.assets.get_mut(&id).ok_or(AppError::AssetNotFound)?;
                stored.registered_at = entry.registered_at;
                *entry = stored.clone();
            }
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FixedIncome>, AppError> {
        Ok(self.assets.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<FixedIncome>, AppError> {
        let mut assets: Vec<FixedIncome> = self
            .assets
            .iter()
            .filter(|entry| entry.owner_id == Some(owner_id))
            .map(|entry| entry.value().clone())
            .collect();
        assets.sort_by(|a, b| a.maturity_date.cmp(&b.maturity_date).then(a.id.cmp(&b.id)));
        Ok(assets)
    }

    async fn delete(&self, asset: &FixedIncome) -> Result<(), AppError> {
        self.deleted.lock().push(asset.clone());

        let id = asset.id.ok_or(AppError::AssetNotFound)?;
        self.assets
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::AssetNotFound)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<i64, User>,
    emails: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn save(&self, input: CreateUser) -> Result<User, AppError> {
        let id = match self.emails.entry(input.email.clone()) {
            Entry::Occupied(_) => return Err(duplicate_email(&input.email)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                slot.insert(id);
                id
            }
        };
        let user = User {
            id,
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}
