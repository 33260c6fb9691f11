use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkbound_core::{
    UserId, VerificationStoreError, VerificationToken, VerificationTokenStore,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Postgres verification ledger. One row per user (`user_id` is the primary
/// key); expired rows are purged opportunistically on write since Postgres
/// has no TTL index.
#[derive(Clone)]
pub struct PostgresVerificationStore {
    pool: PgPool,
}

impl PostgresVerificationStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresVerificationStore { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TokenRow {
    user_id: Uuid,
    secret_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<TokenRow> for VerificationToken {
    fn from(row: TokenRow) -> Self {
        VerificationToken::from_parts(
            UserId::from(row.user_id),
            Secret::from(row.secret_hash),
            row.created_at,
            row.expires_at,
        )
    }
}

#[async_trait]
impl VerificationTokenStore for PostgresVerificationStore {
    #[tracing::instrument(name = "Storing verification token in PostgreSQL", skip_all)]
    async fn store_token(&self, token: VerificationToken) -> Result<(), VerificationStoreError> {
        sqlx::query("DELETE FROM email_verifications WHERE expires_at < now()")
            .execute(&self.pool)
            .await
            .map_err(|e| VerificationStoreError::UnexpectedError(e.to_string()))?;

        sqlx::query(
            r#"
                INSERT INTO email_verifications (user_id, secret_hash, created_at, expires_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*token.user_id().as_uuid())
        .bind(token.secret_hash().expose_secret())
        .bind(token.created_at())
        .bind(token.expires_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return VerificationStoreError::UnexpectedError(
                        "a verification is already pending for this user".to_string(),
                    );
                }
            }
            VerificationStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving verification token from PostgreSQL", skip_all)]
    async fn get_token(
        &self,
        user_id: UserId,
    ) -> Result<VerificationToken, VerificationStoreError> {
        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT user_id, secret_hash, created_at, expires_at FROM email_verifications WHERE user_id = $1",
        )
        .bind(*user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| VerificationStoreError::UnexpectedError(e.to_string()))?;

        row.map(VerificationToken::from)
            .ok_or(VerificationStoreError::TokenNotFound)
    }

    #[tracing::instrument(name = "Deleting verification tokens from PostgreSQL", skip_all)]
    async fn delete_tokens(&self, user_id: UserId) -> Result<(), VerificationStoreError> {
        sqlx::query("DELETE FROM email_verifications WHERE user_id = $1")
            .bind(*user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| VerificationStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
