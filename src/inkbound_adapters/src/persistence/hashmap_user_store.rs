use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;
use inkbound_core::{Email, ProfileUpdate, User, UserId, UserStore, UserStoreError};
use secrecy::Secret;

/// In-memory user store backing the API test suite and local development.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(email).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash);
        Ok(())
    }

    async fn mark_verified(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.mark_verified();
        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.apply_profile_update(update);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let email = users
            .iter()
            .find(|(_, user)| user.id() == id)
            .map(|(email, _)| email.clone())
            .ok_or(UserStoreError::UserNotFound)?;
        users.remove(&email);
        Ok(())
    }
}
