//! In-process user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gatehouse_models::{NewUser, Role, User, UserChanges, UserRecord};

use crate::{StoreError, UserRepository};

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(UserRecord::identity)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<Uuid, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate);
        }

        let id = Uuid::new_v4();
        users.insert(
            id,
            UserRecord {
                id,
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                role: user.role,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Duplicate);
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        Ok(())
    }

    async fn admin_exists(&self) -> Result<bool, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.role == Role::Admin))
    }
}
