use std::sync::Arc;

use tracing::warn;

use crate::errors::AppError;
use crate::models::{CreateUser, User};
use crate::store::UserStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CreateUser) -> Result<User, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("User name cannot be empty".into()));
        }
        if input.email.trim().is_empty() {
            return Err(AppError::Validation("User email cannot be empty".into()));
        }
        self.store.save(input).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User, AppError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            warn!("User {} not found", id);
            AppError::UserNotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserStore::new()))
    }

    #[tokio::test]
    async fn creates_and_resolves_user() {
        let service = service();
        let user = service
            .create(CreateUser { name: "Pamela".into(), email: "pamela@example.com".into() })
            .await
            .unwrap();

        assert_eq!(service.get_user_by_id(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn unknown_user_is_reported() {
        let err = service().get_user_by_id(3).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let service = service();
        let blank_name = service
            .create(CreateUser { name: "  ".into(), email: "a@b.c".into() })
            .await;
        let blank_email = service
            .create(CreateUser { name: "Ana".into(), email: "".into() })
            .await;
        assert!(matches!(blank_name, Err(AppError::Validation(_))));
        assert!(matches!(blank_email, Err(AppError::Validation(_))));
    }
}
