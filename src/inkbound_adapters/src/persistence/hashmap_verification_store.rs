use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;
use inkbound_core::{UserId, VerificationStoreError, VerificationToken, VerificationTokenStore};

/// In-memory verification ledger. Keyed by user id, so the one-effective-
/// token-per-user rule holds by construction.
#[derive(Default, Clone)]
pub struct HashMapVerificationStore {
    tokens: Arc<RwLock<HashMap<UserId, VerificationToken>>>,
}

impl HashMapVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl VerificationTokenStore for HashMapVerificationStore {
    async fn store_token(&self, token: VerificationToken) -> Result<(), VerificationStoreError> {
        self.tokens.write().await.insert(token.user_id(), token);
        Ok(())
    }

    async fn get_token(
        &self,
        user_id: UserId,
    ) -> Result<VerificationToken, VerificationStoreError> {
        self.tokens
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(VerificationStoreError::TokenNotFound)
    }

    async fn delete_tokens(&self, user_id: UserId) -> Result<(), VerificationStoreError> {
        self.tokens.write().await.remove(&user_id);
        Ok(())
    }
}
